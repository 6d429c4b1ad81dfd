use std::fmt;

use serde::Serialize;

use super::dora::count_dora;
use super::point::{calc_base_point, calc_points, calc_score, get_score_title};
use super::shanten::{calc_chiitoitsu_shanten, calc_kokushimusou_shanten, calc_normal_shanten};
use crate::model::*;

// 和了形の評価に必要な状況
#[derive(Debug, Clone)]
pub struct WinContext<'a> {
    pub winning_kind: Kind,  // 和了牌 (手牌に含まれている)
    pub melds: &'a [Meld],   // 副露
    pub doras: &'a [Kind],   // ドラ表示牌 (ドラそのものではない)
    pub is_drawn: bool,      // ツモ和了
    pub is_riichi: bool,     // リーチ
    pub prevalent_wind: Kind, // 場風 (WE~WN)
    pub seat_wind: Kind,     // 自風 (WE~WN), 東家が親
    pub require_yaku: bool,  // 役なしを失敗として扱う
}

impl WinContext<'_> {
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueFailure {
    NoQualifyingCombination, // 和了形だが役がない
    NotComplete,             // 和了形ではない
}

impl fmt::Display for ValueFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueFailure::NoQualifyingCombination => "no-qualifying-combination",
            ValueFailure::NotComplete => "not-complete",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Yaku {
    pub name: &'static str,
    pub han: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Valuation {
    pub score: Score, // 和了者の収入
    pub fu: usize,
    pub han: usize,
    pub yakuman: usize,
    pub title: &'static str,
    pub yakus: Vec<Yaku>,
    pub failure: Option<ValueFailure>,
}

impl Valuation {
    pub fn failed(failure: ValueFailure) -> Self {
        Self {
            score: 0,
            fu: 0,
            han: 0,
            yakuman: 0,
            title: "",
            yakus: vec![],
            failure: Some(failure),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }
}

// 和了形の点数計算
// handは副露を除いた手牌(和了牌を含む)
pub trait ValueOracle {
    fn value(&self, hand: &TileCounts, ctx: &WinContext) -> Valuation;
}

// 役なしかつrequire_yaku = falseの場合の点数
pub const NO_YAKU_SCORE: Score = 1000;

// 限定された役のみを判定する簡易的な点数計算
// 符は30符固定 (七対子は25符)
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleValue;

impl ValueOracle for SimpleValue {
    fn value(&self, hand: &TileCounts, ctx: &WinContext) -> Valuation {
        let is_normal = calc_normal_shanten(hand) == -1;
        let is_closed = hand.total() >= 13;
        let is_chiitoitsu = is_closed && calc_chiitoitsu_shanten(hand) == -1;
        let is_kokushi = is_closed && calc_kokushimusou_shanten(hand) == -1;
        if !is_normal && !is_chiitoitsu && !is_kokushi {
            return Valuation::failed(ValueFailure::NotComplete);
        }

        let mut yakus = vec![];
        let mut yakuman = 0;
        let mut fu = 30;
        if is_kokushi {
            yakus.push(Yaku {
                name: "国士無双",
                han: 13,
            });
            yakuman = 1;
        } else {
            let is_menzen = is_menzen(ctx.melds);
            if ctx.is_riichi && is_menzen {
                yakus.push(Yaku {
                    name: "立直",
                    han: 1,
                });
            }
            if ctx.is_drawn && is_menzen {
                yakus.push(Yaku {
                    name: "門前清自摸和",
                    han: 1,
                });
            }
            if is_tanyaochuu(hand, ctx.melds) {
                yakus.push(Yaku {
                    name: "断幺九",
                    han: 1,
                });
            }
            if is_normal {
                yakus.append(&mut yakuhai(hand, ctx));
            } else {
                fu = 25;
                yakus.push(Yaku {
                    name: "七対子",
                    han: 2,
                });
            }
        }

        let mut han: usize = yakus.iter().map(|y| y.han).sum();
        if yakus.is_empty() {
            if ctx.require_yaku {
                return Valuation::failed(ValueFailure::NoQualifyingCombination);
            }
            return Valuation {
                score: NO_YAKU_SCORE,
                fu,
                han: 0,
                yakuman: 0,
                title: "",
                yakus,
                failure: None,
            };
        }

        if yakuman == 0 {
            let n_dora = count_dora(hand, ctx.melds, ctx.doras);
            if n_dora != 0 {
                yakus.push(Yaku {
                    name: "ドラ",
                    han: n_dora,
                });
                han += n_dora;
            }
        }

        let is_dealer = ctx.is_dealer();
        let points = calc_points(is_dealer, fu, han, yakuman);
        let base = calc_base_point(fu, han, yakuman);
        Valuation {
            score: calc_score(points, is_dealer, ctx.is_drawn),
            fu,
            han,
            yakuman,
            title: get_score_title(base, yakuman),
            yakus,
            failure: None,
        }
    }
}

fn is_tanyaochuu(hand: &TileCounts, melds: &[Meld]) -> bool {
    hand.iter().all(|(k, _)| is_simple(k)) && melds.iter().all(|m| m.kinds().into_iter().all(is_simple))
}

// 役牌 字牌は順子にならないため3枚以上あれば刻子
fn yakuhai(hand: &TileCounts, ctx: &WinContext) -> Vec<Yaku> {
    let mut yakus = vec![];
    for k in WE..=DR {
        let is_set = hand.get(k) >= 3
            || ctx
                .melds
                .iter()
                .any(|m| m.kind == k && m.meld_type != MeldType::Chi);
        if !is_set {
            continue;
        }
        if is_doragon(k) {
            yakus.push(Yaku {
                name: ["役牌:白", "役牌:發", "役牌:中"][k - DW],
                han: 1,
            });
        }
        if k == ctx.seat_wind {
            yakus.push(Yaku {
                name: "役牌:自風牌",
                han: 1,
            });
        }
        if k == ctx.prevalent_wind {
            yakus.push(Yaku {
                name: "役牌:場風牌",
                han: 1,
            });
        }
    }
    yakus
}

#[cfg(test)]
fn ctx_for_test<'a>(melds: &'a [Meld], doras: &'a [Kind], is_drawn: bool) -> WinContext<'a> {
    WinContext {
        winning_kind: 0,
        melds,
        doras,
        is_drawn,
        is_riichi: false,
        prevalent_wind: WE,
        seat_wind: WS,
        require_yaku: true,
    }
}

#[test]
fn test_simple_value_yaku() {
    let oracle = SimpleValue;

    // 断幺九 ロン 30符1飜
    let hand = TileCounts::from_kinds(&kinds_from_str("m234567p345s66688"));
    let v = oracle.value(&hand, &ctx_for_test(&[], &[], false));
    assert!(v.is_ok());
    assert_eq!(v.han, 1);
    assert_eq!(v.score, 1000);

    // 門前ツモ + 断幺九 子のツモ: 500 * 2 + 1000
    let v = oracle.value(&hand, &ctx_for_test(&[], &[], true));
    assert_eq!(v.han, 2);
    assert_eq!(v.score, 2000);

    // ドラは役の後に加算
    let v = oracle.value(&hand, &ctx_for_test(&[], &[TS + 4], false));
    assert_eq!(v.han, 4); // s6 * 3
    assert_eq!(v.score, 7700);
}

#[test]
fn test_simple_value_failure() {
    let oracle = SimpleValue;

    // 役なし (么九牌を含むロン)
    let hand = TileCounts::from_kinds(&kinds_from_str("m123567p345s66699"));
    let v = oracle.value(&hand, &ctx_for_test(&[], &[TS + 4], false));
    assert_eq!(v.failure, Some(ValueFailure::NoQualifyingCombination));
    assert_eq!(v.score, 0);
    assert_eq!(v.failure.unwrap().to_string(), "no-qualifying-combination");

    let mut ctx = ctx_for_test(&[], &[], false);
    ctx.require_yaku = false;
    let v = oracle.value(&hand, &ctx);
    assert!(v.is_ok());
    assert_eq!(v.score, NO_YAKU_SCORE);

    // 和了形ではない
    let hand = TileCounts::from_kinds(&kinds_from_str("m123567p345s66689"));
    let v = oracle.value(&hand, &ctx_for_test(&[], &[], true));
    assert_eq!(v.failure, Some(ValueFailure::NotComplete));
}

#[test]
fn test_simple_value_special() {
    let oracle = SimpleValue;

    // 役牌(中) + 自風(南) 副露あり
    let melds = [Meld::new(MeldType::Pon, WS, 0)];
    let hand = TileCounts::from_kinds(&kinds_from_str("m123p789z777s11"));
    let v = oracle.value(&hand, &ctx_for_test(&melds, &[], false));
    assert_eq!(v.han, 2);
    assert_eq!(v.yakus.len(), 2);

    // 副露ありのツモは門前清自摸和にならない
    let v = oracle.value(&hand, &ctx_for_test(&melds, &[], true));
    assert_eq!(v.han, 2);

    // 七対子 25符2飜
    let hand = TileCounts::from_kinds(&kinds_from_str("m1133p2255s7799z11"));
    let v = oracle.value(&hand, &ctx_for_test(&[], &[], false));
    assert_eq!((v.fu, v.han), (25, 2));
    assert_eq!(v.score, 1600);

    // 国士無双 子のロン
    let hand = TileCounts::from_kinds(&kinds_from_str("m19p19s19z12345677"));
    let v = oracle.value(&hand, &ctx_for_test(&[], &[], false));
    assert_eq!(v.yakuman, 1);
    assert_eq!(v.score, 32000);
    assert_eq!(v.title, "役満");
}
