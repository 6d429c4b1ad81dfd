// 対局の進行 (牌山, 卓の状態, 割り込みの解決)
mod config;
mod controller;
mod stage;
mod wall;

pub use self::{
    config::MatchConfig,
    controller::{CallOffer, MatchController},
    stage::Stage,
    wall::{create_wall, create_wall_debug},
};
