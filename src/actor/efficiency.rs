use rand::prelude::*;

use super::*;
use crate::efficiency::{rank_by_efficiency, rank_by_expected_value, DiscardCandidate, RankContext};

// 受け入れ枚数と期待値で打牌を選ぶBot
// 鳴ける場合は一定の確率で鳴く
#[derive(Debug, Clone)]
pub struct EfficiencyBot {
    rng: StdRng,
    call_probability: f64,
}

impl EfficiencyBot {
    pub fn new(seed: u64, call_probability: f64) -> Self {
        Self {
            rng: SeedableRng::seed_from_u64(seed),
            call_probability,
        }
    }

    // 聴牌なら期待値, それ以外は受け入れ枚数で打牌候補を順位付け
    // 残り枚数は場の見えている牌 (捨て牌, 副露, ドラ表示牌) のみから数える
    pub fn rank_discards(&self, stg: &Stage, seat: Seat, oracle: &Oracle) -> Vec<DiscardCandidate> {
        let pl = &stg.players[seat];
        let hand = pl.counts();
        let doras = stg.dora_kinds();
        let shanten = oracle.shanten.shanten(&hand);
        if shanten == 0 {
            let ctx = RankContext {
                melds: &pl.melds,
                doras: &doras,
                require_yaku: true,
                round_wind: stg.round_wind,
                seat_wind: pl.seat_wind,
            };
            rank_by_expected_value(oracle, &hand, &stg.visibles, shanten, &ctx)
        } else {
            rank_by_efficiency(oracle.shanten.as_ref(), &hand, &stg.visibles, &doras)
        }
    }
}

impl Actor for EfficiencyBot {
    fn select_discard(&mut self, stg: &Stage, seat: Seat, oracle: &Oracle) -> Kind {
        match self.rank_discards(stg, seat, oracle).first() {
            Some(c) => c.discard_kind,
            None => stg.players[seat].hand.last().map(|t| t.kind()).unwrap_or(NO_KIND),
        }
    }

    fn select_call(&mut self, _stg: &Stage, _seat: Seat, _kind: Kind, _meld_type: MeldType) -> bool {
        self.rng.gen::<f64>() < self.call_probability
    }

    fn get_name(&self) -> String {
        format!("EfficiencyBot(p={})", self.call_probability)
    }
}

#[test]
fn test_call_probability() {
    use crate::control::create_wall;

    let stg = Stage::new(create_wall(0), WE, 25000);
    let n_trial = 10000;
    for seed in [1, 2, 3] {
        let mut bot = EfficiencyBot::new(seed, 0.3);
        let n_accept = (0..n_trial)
            .filter(|_| bot.select_call(&stg, 1, TM, MeldType::Pon))
            .count();
        let rate = n_accept as f64 / n_trial as f64;
        assert!((rate - 0.3).abs() < 0.03, "rate: {}", rate);
    }

    // 確率 1.0, 0.0 で強制, 禁止
    let mut always = EfficiencyBot::new(0, 1.0);
    let mut never = EfficiencyBot::new(0, 0.0);
    for _ in 0..100 {
        assert!(always.select_call(&stg, 1, TM, MeldType::Pon));
        assert!(!never.select_call(&stg, 1, TM, MeldType::Minkan));
    }
}

#[test]
fn test_select_discard() {
    use crate::control::create_wall_debug;

    let oracle = Oracle::default();
    // 孤立した字牌を切る
    let hand0 = kinds_from_str("m123456789p1279");
    let stg = Stage::new(create_wall_debug(0, Some(TS), [&hand0[..13], &[], &[], &[]], &[WN]), WE, 25000);
    let mut bot = EfficiencyBot::new(0, 0.3);
    let k = bot.select_discard(&stg, 0, &oracle);
    assert_eq!(k, WN, "{}", kind_symbol(k));

    // 聴牌なら期待値で選ぶ: s9切りでs7,s8待ち
    let hand0 = kinds_from_str("m234567p345s6668");
    let stg = Stage::new(create_wall_debug(0, Some(WE), [&hand0[..13], &[], &[], &[]], &[TS + 8]), WE, 25000);
    let k = bot.select_discard(&stg, 0, &oracle);
    assert_eq!(k, TS + 8);
}

#[test]
fn test_rank_discards_visible() {
    use crate::control::create_wall_debug;

    let oracle = Oracle::default();
    let hand0 = kinds_from_str("m123456789p1279");
    let mut stg = Stage::new(create_wall_debug(0, Some(TS), [&hand0[..13], &[], &[], &[]], &[WN]), WE, 25000);
    stg.visibles.record(TP + 2, 2);
    let bot = EfficiencyBot::new(0, 0.3);
    let cands = bot.rank_discards(&stg, 0, &oracle);
    let top = &cands[0];
    assert_eq!(top.discard_kind, WN);
    assert!(!top.breakdown.is_empty());
    // 自分の手牌は残り枚数から除外しない
    for a in &top.breakdown {
        assert_eq!(a.tiles_left, TILE - stg.visibles.get(a.kind));
    }
    let p1 = top.breakdown.iter().find(|a| a.kind == TP).unwrap();
    assert_eq!(p1.tiles_left, TILE);
    let p3 = top.breakdown.iter().find(|a| a.kind == TP + 2).unwrap();
    assert_eq!(p3.tiles_left, 2);
}
