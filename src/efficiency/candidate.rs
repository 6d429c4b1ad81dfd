use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::hand::{create_dora_table, ValueFailure};
use crate::model::*;

// 有効牌 (打牌後にツモると向聴数が下がる牌)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acceptance {
    pub kind: Kind,
    pub tiles_left: usize, // 4 - 見えている枚数
    // 和了牌の場合の点数 (期待値計算時のみ)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_score: Option<Score>,
}

// 打牌候補
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscardCandidate {
    pub discard_kind: Kind,
    pub shanten_after: i32,
    pub ukeire_total: usize,
    pub utility: i32,
    pub expected_value: Option<i64>,
    pub failure_reason: Option<ValueFailure>,
    pub breakdown: Vec<Acceptance>,
}

impl DiscardCandidate {
    pub fn new(discard_kind: Kind, shanten_after: i32, utility: i32) -> Self {
        Self {
            discard_kind,
            shanten_after,
            ukeire_total: 0,
            utility,
            expected_value: None,
            failure_reason: None,
            breakdown: vec![],
        }
    }

    pub fn accept(&mut self, kind: Kind, tiles_left: usize, estimated_score: Option<Score>) {
        self.ukeire_total += tiles_left;
        self.breakdown.push(Acceptance {
            kind,
            tiles_left,
            estimated_score,
        });
    }

    // 受け入れ優先の並び順 (降順)
    fn efficiency_key(&self) -> (bool, i32, usize, i32) {
        (
            self.ukeire_total > 0,
            -self.shanten_after,
            self.ukeire_total,
            self.utility,
        )
    }

    // 期待値優先の並び順 (降順)
    fn ev_key(&self) -> (bool, i32, i64, usize, i32) {
        (
            self.ukeire_total > 0,
            -self.shanten_after,
            self.expected_value.unwrap_or(0),
            self.ukeire_total,
            self.utility,
        )
    }
}

impl fmt::Display for DiscardCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sh:{} ukeire:{} utility:{}",
            kind_symbol(self.discard_kind),
            self.shanten_after,
            self.ukeire_total,
            self.utility,
        )?;
        if let Some(ev) = self.expected_value {
            write!(f, " ev:{}", ev)?;
        }
        if let Some(r) = self.failure_reason {
            write!(f, " ({})", r)?;
        }
        Ok(())
    }
}

pub fn cmp_by_efficiency(a: &DiscardCandidate, b: &DiscardCandidate) -> Ordering {
    b.efficiency_key().cmp(&a.efficiency_key())
}

pub fn cmp_by_expected_value(a: &DiscardCandidate, b: &DiscardCandidate) -> Ordering {
    b.ev_key().cmp(&a.ev_key())
}

// 打牌後の手牌の形の良さ
// ドラ: +50, 中張牌: +2, 么九牌: -1 (いずれも1枚あたり)
pub fn calc_utility(trial: &TileCounts, doras: &[Kind]) -> i32 {
    let dt = create_dora_table(doras);
    let mut utility = 0;
    for (k, n) in trial.iter() {
        let n = n as i32;
        if dt[k] > 0 {
            utility += 50 * n; // 複数の表示牌が同じドラを指していても1回のみ
        }
        if is_simple(k) {
            utility += 2 * n;
        } else {
            utility -= n;
        }
    }
    utility
}

#[test]
fn test_utility() {
    let trial = TileCounts::from_kinds(&kinds_from_str("m19p55z11"));
    // m1, m9, z1 * 2: -4, p5 * 2: +4
    assert_eq!(calc_utility(&trial, &[]), 0);
    // 表示牌 p4 -> ドラ p5
    assert_eq!(calc_utility(&trial, &[TP + 3]), 100);
    assert_eq!(calc_utility(&trial, &[TP + 3, TP + 3]), 100);
    // 表示牌 z4 -> ドラ z1
    assert_eq!(calc_utility(&trial, &[WN]), 100);
}

#[test]
fn test_sort_order() {
    let mut a = DiscardCandidate::new(0, 1, 10);
    a.accept(5, 4, None);
    let mut b = DiscardCandidate::new(1, 1, 0);
    b.accept(5, 4, None);
    b.accept(6, 1, None);
    let c = DiscardCandidate::new(2, 0, 100); // 受け入れなし
    let mut d = DiscardCandidate::new(3, 2, 100);
    d.accept(5, 4, None);
    d.accept(6, 4, None);

    let mut cs = vec![a.clone(), b.clone(), c.clone(), d.clone()];
    cs.sort_by(cmp_by_efficiency);
    let order: Vec<Kind> = cs.iter().map(|c| c.discard_kind).collect();
    assert_eq!(order, vec![1, 0, 3, 2]);

    a.expected_value = Some(8000);
    b.expected_value = Some(5000);
    let mut cs = vec![b, a, c, d];
    cs.sort_by(cmp_by_expected_value);
    let order: Vec<Kind> = cs.iter().map(|c| c.discard_kind).collect();
    assert_eq!(order, vec![0, 1, 3, 2]);
}
