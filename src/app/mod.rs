// mainから直接呼び出すアプリケーションの動作モード(E, C, S)のモジュール

mod calculator;
mod engine;
mod session;

pub use calculator::CalculatorApp;
pub use engine::EngineApp;
pub use session::SessionApp;
