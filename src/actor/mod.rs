mod efficiency;

use std::fmt;

use crate::control::Stage;
use crate::hand::Oracle;
use crate::model::*;

pub use efficiency::EfficiencyBot;

// Actor trait
// 人間以外の座席の意思決定. 乱数はActorごとに保持して注入する
pub trait Actor {
    // 打牌の選択 (ツモ後または鳴いた直後に呼び出される)
    fn select_discard(&mut self, stg: &Stage, seat: Seat, oracle: &Oracle) -> Kind;

    // 他家の打牌に対して鳴くかどうか
    fn select_call(&mut self, stg: &Stage, seat: Seat, kind: Kind, meld_type: MeldType) -> bool;

    // Actorの詳細表示用
    fn get_name(&self) -> String;
}

impl fmt::Debug for dyn Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_name())
    }
}

// 全座席分のAIを作成 (human_seatはNone)
pub fn create_actors(seed: u64, call_probability: f64, human_seat: Option<Seat>) -> [Option<Box<dyn Actor>>; SEAT] {
    let mut actors: [Option<Box<dyn Actor>>; SEAT] = Default::default();
    for (s, a) in actors.iter_mut().enumerate() {
        if Some(s) != human_seat {
            // 座席ごとに異なる乱数列
            let bot = EfficiencyBot::new(seed.wrapping_add(s as u64), call_probability);
            *a = Some(Box::new(bot));
        }
    }
    actors
}
