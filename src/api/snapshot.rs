use serde::Serialize;

use crate::control::{CallOffer, MatchController};
use crate::model::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatSnapshot {
    pub index: Seat,
    pub seat_wind: Kind,
    pub score: Score,
    pub is_human: bool,
    pub discards: Vec<Kind>,
    pub melds: Vec<Meld>,
    pub hand_count: usize,
    // 人間の座席, または終局後は全席
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Kind>>,
}

// 外部に公開する対局の状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    pub current_turn: Seat,
    pub wall_remaining: usize,
    pub dora_indicator_kinds: Vec<Kind>,
    pub is_game_over: bool,
    pub winner_seat: Option<Seat>,
    pub seats: Vec<SeatSnapshot>,
    pub pending_call: Option<CallOffer>,
}

impl MatchSnapshot {
    pub fn new(ctrl: &MatchController) -> Self {
        let stg = ctrl.stage();
        let human = ctrl.human_seat();
        let seats = stg
            .players
            .iter()
            .map(|pl| {
                let is_human = Some(pl.seat) == human;
                SeatSnapshot {
                    index: pl.seat,
                    seat_wind: pl.seat_wind,
                    score: pl.score,
                    is_human,
                    discards: pl.discard_kinds(),
                    melds: pl.melds.clone(),
                    hand_count: pl.hand.len(),
                    hand: if is_human || stg.is_over {
                        Some(pl.counts().to_kinds())
                    } else {
                        None
                    },
                }
            })
            .collect();

        Self {
            current_turn: stg.turn,
            wall_remaining: stg.wall.len(),
            dora_indicator_kinds: stg.dora_kinds(),
            is_game_over: stg.is_over,
            winner_seat: stg.winner,
            seats,
            pending_call: ctrl.pending_call().cloned(),
        }
    }
}
