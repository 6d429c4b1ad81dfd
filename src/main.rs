#![warn(rust_2018_idioms)]

mod app;

use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        error!("mode not specified");
        return;
    }

    let args2 = args[2..].to_vec();
    let res = match args[1].as_str() {
        // Engine (bot対戦シミュレーションモード)
        "E" => app::EngineApp::new(args2).and_then(|a| a.run()),
        // Calculator (打牌候補評価モード)
        "C" => app::CalculatorApp::new(args2).and_then(|a| a.run()),
        // Session (JSON-lines対局モード)
        "S" => app::SessionApp::new(args2).and_then(|a| a.run()),
        m => {
            error!("unknown mode: {}", m);
            return;
        }
    };

    if let Err(e) = res {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
