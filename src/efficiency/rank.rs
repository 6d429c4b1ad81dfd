use super::candidate::*;
use crate::hand::{Oracle, ShantenOracle, ValueFailure, WinContext};
use crate::model::*;

// 期待値計算で和了に至らない有効牌の重み
pub const IMPROVEMENT_WEIGHT: i64 = 1000;

// 期待値計算に必要な手牌以外の状況
#[derive(Debug, Clone)]
pub struct RankContext<'a> {
    pub melds: &'a [Meld],
    pub doras: &'a [Kind], // ドラ表示牌
    pub require_yaku: bool,
    pub round_wind: Kind,
    pub seat_wind: Kind,
}

impl<'a> RankContext<'a> {
    pub fn new(melds: &'a [Meld], doras: &'a [Kind]) -> Self {
        Self {
            melds,
            doras,
            require_yaku: true,
            round_wind: WE,
            seat_wind: WS,
        }
    }

    // 暗槓のみなら立直可能
    pub fn can_riichi(&self) -> bool {
        is_menzen(self.melds)
    }
}

// 打牌dの後の有効牌を列挙 (種類, 残り枚数, 和了するかどうか)
// 手牌は変更せず, 1枚加えたコピーを評価する
fn scan_acceptance(
    oracle: &dyn ShantenOracle,
    trial: &TileCounts,
    visible: &TileCounts,
    shanten_after: i32,
) -> Vec<(Kind, usize, bool)> {
    let mut res = vec![];
    for a in 0..KIND {
        // 見えている牌に手牌が含まれない場合, 手牌4枚の牌はツモれない
        if visible.get(a) >= TILE || trial.get(a) >= TILE {
            continue;
        }
        let sh = oracle.shanten(&trial.with(a));
        if sh < shanten_after {
            res.push((a, visible.left(a), sh == -1));
        }
    }
    res
}

// [Efficiency]
// 有効牌の枚数で打牌候補を順位付けする (向聴数 >= 1 向け)
// 和了形の場合は空のリストを返却
pub fn rank_by_efficiency(
    oracle: &dyn ShantenOracle,
    hand: &TileCounts,
    visible: &TileCounts,
    doras: &[Kind],
) -> Vec<DiscardCandidate> {
    if oracle.shanten(hand) == -1 {
        return vec![];
    }

    let mut cands = vec![];
    for (d, _) in hand.iter() {
        let trial = hand.without(d);
        let shanten_after = oracle.shanten(&trial);
        let mut cand = DiscardCandidate::new(d, shanten_after, calc_utility(&trial, doras));
        for (a, left, _) in scan_acceptance(oracle, &trial, visible, shanten_after) {
            cand.accept(a, left, None);
        }
        cands.push(cand);
    }

    cands.sort_by(cmp_by_efficiency);
    cands
}

// [Expected Value]
// 聴牌(向聴数 = 0)向け. 和了牌はツモ和了の点数, それ以外の有効牌は固定の重みで期待値を計算
pub fn rank_by_expected_value(
    oracle: &Oracle,
    hand: &TileCounts,
    visible: &TileCounts,
    shanten: i32,
    ctx: &RankContext,
) -> Vec<DiscardCandidate> {
    if shanten < 0 {
        return vec![];
    }

    let is_riichi = ctx.can_riichi();
    let mut cands = vec![];
    for (d, _) in hand.iter() {
        let trial = hand.without(d);
        let shanten_after = oracle.shanten.shanten(&trial);
        let mut cand = DiscardCandidate::new(d, shanten_after, calc_utility(&trial, ctx.doras));
        let mut ev = 0;
        let mut failure: Option<ValueFailure> = None;
        for (a, left, is_win) in scan_acceptance(oracle.shanten.as_ref(), &trial, visible, shanten_after) {
            let score = if is_win {
                let win = WinContext {
                    winning_kind: a,
                    melds: ctx.melds,
                    doras: ctx.doras,
                    is_drawn: true,
                    is_riichi,
                    prevalent_wind: ctx.round_wind,
                    seat_wind: ctx.seat_wind,
                    require_yaku: ctx.require_yaku,
                };
                let v = oracle.value.value(&trial.with(a), &win);
                if v.failure.is_some() {
                    failure = v.failure;
                }
                v.score
            } else {
                IMPROVEMENT_WEIGHT as Score
            };
            ev += left as i64 * score as i64;
            cand.accept(a, left, Some(score));
        }
        cand.expected_value = Some(ev);
        cand.failure_reason = failure;
        cands.push(cand);
    }

    cands.sort_by(cmp_by_expected_value);
    cands
}

#[cfg(test)]
fn counts(exp: &str) -> TileCounts {
    TileCounts::from_kinds(&kinds_from_str(exp))
}

#[test]
fn test_efficiency_complete_hand() {
    let oracle = Oracle::default();
    let hand = counts("m123456789p123z11");
    let visible = hand;
    assert!(rank_by_efficiency(oracle.shanten.as_ref(), &hand, &visible, &[]).is_empty());
    let ctx = RankContext::new(&[], &[]);
    assert!(rank_by_expected_value(&oracle, &hand, &visible, -1, &ctx).is_empty());
}

#[test]
fn test_efficiency_tenpai_scenario() {
    // m123 m456 m789 p111 + z1 単騎. ツモ前の13枚
    let oracle = Oracle::default();
    let hand = counts("m123456789p111z1");
    assert_eq!(oracle.shanten.shanten(&hand), 0);

    // 14枚目にz2をツモった状態から打牌を選ぶ
    let hand = hand.with(WS);
    let mut visible = hand;
    visible.record(WE, 2); // 場にz1が2枚
    let cands = rank_by_efficiency(oracle.shanten.as_ref(), &hand, &visible, &[]);
    assert_eq!(cands.len(), 12); // 手牌の種類数

    // z1, z2 どちらを切っても聴牌 (単騎), 残り枚数の多いz2待ちが上位
    let top = &cands[0];
    assert_eq!(top.discard_kind, WE);
    assert_eq!(top.shanten_after, 0);
    assert_eq!(top.ukeire_total, 3);
    let z2 = top.breakdown.iter().find(|a| a.kind == WS).unwrap();
    assert_eq!(z2.tiles_left, 4 - visible.get(WS));

    let second = &cands[1];
    assert_eq!(second.discard_kind, WS);
    assert_eq!(second.ukeire_total, 1);

    // 入力は変更されない
    assert_eq!(hand, counts("m123456789p111z12"));
}

#[test]
fn test_efficiency_idempotent() {
    let oracle = Oracle::default();
    let hand = counts("m1267p3568s23z157");
    let mut visible = hand;
    visible.record(TP + 3, 2);
    visible.record(TS + 3, 1);
    let doras = [TS];
    let r1 = rank_by_efficiency(oracle.shanten.as_ref(), &hand, &visible, &doras);
    let r2 = rank_by_efficiency(oracle.shanten.as_ref(), &hand, &visible, &doras);
    assert_eq!(r1, r2);
    assert_eq!(hand, counts("m1267p3568s23z157"));

    for c in &r1 {
        for a in &c.breakdown {
            assert_eq!(a.tiles_left, TILE - visible.get(a.kind));
            assert!(a.tiles_left >= 1 && a.tiles_left <= TILE);
        }
        let sum: usize = c.breakdown.iter().map(|a| a.tiles_left).sum();
        assert_eq!(sum, c.ukeire_total);
    }
    // 降順に並んでいる
    for w in r1.windows(2) {
        assert_ne!(cmp_by_efficiency(&w[0], &w[1]), std::cmp::Ordering::Greater);
    }
}

#[test]
fn test_efficiency_fully_visible() {
    let oracle = Oracle::default();
    // 待ちのp3が全て見えている
    let hand = counts("m123456789p12z11s9");
    let mut visible = hand;
    visible.record(TP + 2, 4);
    let cands = rank_by_efficiency(oracle.shanten.as_ref(), &hand, &visible, &[]);
    let s9 = cands.iter().find(|c| c.discard_kind == TS + 8).unwrap();
    assert_eq!(s9.shanten_after, 0);
    assert_eq!(s9.ukeire_total, 0);
    // 受け入れのある候補が上位
    assert!(cands[0].ukeire_total > 0);
}

#[test]
fn test_expected_value() {
    let oracle = Oracle::default();
    // m234 m567 p345 s666 s8 + s9 (ツモ). s9を切ればs8単騎で断幺九
    let hand = counts("m234567p345s66689");
    let visible = hand;
    let ctx = RankContext::new(&[], &[]);
    let cands = rank_by_expected_value(&oracle, &hand, &visible, 0, &ctx);

    let top = &cands[0];
    assert_eq!(top.shanten_after, 0);
    assert!(top.expected_value.unwrap() > 0);
    for c in &cands {
        let ev: i64 = c
            .breakdown
            .iter()
            .map(|a| a.tiles_left as i64 * a.estimated_score.unwrap() as i64)
            .sum();
        assert_eq!(c.expected_value, Some(ev));
    }

    // s9切り: s7(両面), s8(単騎) 待ち. 立直 + 門前ツモ + 断幺九
    let s9 = cands.iter().find(|c| c.discard_kind == TS + 8).unwrap();
    let waits: Vec<Kind> = s9.breakdown.iter().map(|a| a.kind).collect();
    assert_eq!(waits, vec![TS + 6, TS + 7]);
    assert!(s9.failure_reason.is_none());

    // 和了しない有効牌は固定の重みで計上
    let retreat = cands.iter().find(|c| c.shanten_after == 1 && c.ukeire_total > 0).unwrap();
    assert!(retreat
        .breakdown
        .iter()
        .all(|a| a.estimated_score == Some(IMPROVEMENT_WEIGHT as Score)));

    let r2 = rank_by_expected_value(&oracle, &hand, &visible, 0, &ctx);
    assert_eq!(cands, r2);
}

#[test]
fn test_expected_value_no_yaku() {
    let oracle = Oracle::default();
    // 副露ありで役なし (ポン m1)
    let melds = [Meld::new(MeldType::Pon, TM, 2)];
    let hand = counts("m789p345s6688z3");
    let visible = hand;
    let mut ctx = RankContext::new(&melds, &[]);
    let cands = rank_by_expected_value(&oracle, &hand, &visible, 0, &ctx);
    let z3 = cands.iter().find(|c| c.discard_kind == WW).unwrap();
    assert_eq!(z3.ukeire_total, 2 + 2); // s6, s8 のシャンポン待ち
    assert_eq!(z3.expected_value, Some(0));
    assert_eq!(z3.failure_reason, Some(ValueFailure::NoQualifyingCombination));

    ctx.require_yaku = false;
    let cands = rank_by_expected_value(&oracle, &hand, &visible, 0, &ctx);
    let z3 = cands.iter().find(|c| c.discard_kind == WW).unwrap();
    assert!(z3.failure_reason.is_none());
    assert!(z3.expected_value.unwrap() > 0);
}
