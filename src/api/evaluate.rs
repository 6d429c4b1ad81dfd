use log::debug;
use serde::{Deserialize, Serialize};

use crate::efficiency::*;
use crate::hand::{Oracle, ValueFailure};
use crate::model::*;

fn default_true() -> bool {
    true
}

fn default_round_wind() -> Kind {
    WE
}

fn default_seat_wind() -> Kind {
    WS
}

// 打牌候補の評価要求
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluateRequest {
    pub hand: Vec<Kind>, // 副露を除いた手牌
    #[serde(default)]
    pub visible: Vec<Kind>, // 手牌, 副露, ドラ表示牌以外で見えている牌 (捨て牌など)
    #[serde(default)]
    pub melds: Vec<Meld>,
    #[serde(default)]
    pub dora: Vec<Kind>, // ドラ表示牌
    #[serde(default = "default_true")]
    pub require_yaku: bool,
    #[serde(default = "default_round_wind")]
    pub round_wind: Kind,
    #[serde(default = "default_seat_wind")]
    pub seat_wind: Kind,
    #[serde(default)]
    pub limit: Option<usize>, // 上位N件のみ返却
}

impl EvaluateRequest {
    pub fn new(hand: Vec<Kind>) -> Self {
        Self {
            hand,
            visible: vec![],
            melds: vec![],
            dora: vec![],
            require_yaku: true,
            round_wind: default_round_wind(),
            seat_wind: default_seat_wind(),
            limit: None,
        }
    }

    // 手牌の枚数表と見えている牌の枚数表
    // 見えている牌は 手牌 + visible + 副露 + ドラ表示牌. 同種の牌が4枚を超える要求はエラー
    fn to_counts(&self) -> Result<(TileCounts, TileCounts), Error> {
        for &k in self.hand.iter().chain(&self.visible).chain(&self.dora) {
            check_kind(k)?;
        }
        for m in &self.melds {
            m.check()?;
        }
        for w in [self.round_wind, self.seat_wind] {
            if !is_wind(w) {
                return Err(Error::InvalidKind(w));
            }
        }

        let meld_kinds: Vec<Kind> = self.melds.iter().flat_map(|m| m.kinds()).collect();
        let mut seen = [0; KIND];
        for &k in self
            .hand
            .iter()
            .chain(&meld_kinds)
            .chain(&self.visible)
            .chain(&self.dora)
        {
            seen[k] += 1;
            if seen[k] > TILE {
                return Err(Error::TooManyTiles(k));
            }
        }

        let hand = TileCounts::from_kinds(&self.hand);
        let mut visible = TileCounts::new();
        for (k, &n) in seen.iter().enumerate() {
            visible.record(k, n);
        }
        Ok((hand, visible))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedDiscard {
    pub discard_kind: Kind,
    pub shanten_after: i32,
    pub ukeire_total: usize,
    pub ev: Option<i64>,
    pub failure_reason: Option<ValueFailure>,
    pub is_retreat: bool, // 打牌により向聴数が増える
    pub breakdown: Vec<Acceptance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluateResponse {
    pub shanten: i32,
    pub ranked: Vec<RankedDiscard>,
}

// 向聴数 >= 1 は受け入れ枚数, 聴牌は期待値で順位付け. 和了形は空のリスト
pub fn evaluate(oracle: &Oracle, req: &EvaluateRequest) -> Result<EvaluateResponse, Error> {
    let (hand, visible) = req.to_counts()?;
    let shanten = oracle.shanten.shanten(&hand);

    let cands = match shanten {
        -1 => vec![],
        0 => {
            let ctx = RankContext {
                melds: &req.melds,
                doras: &req.dora,
                require_yaku: req.require_yaku,
                round_wind: req.round_wind,
                seat_wind: req.seat_wind,
            };
            rank_by_expected_value(oracle, &hand, &visible, shanten, &ctx)
        }
        _ => rank_by_efficiency(oracle.shanten.as_ref(), &hand, &visible, &req.dora),
    };
    debug!("evaluate {}: shanten {}, {} candidates", hand, shanten, cands.len());

    let limit = req.limit.unwrap_or(cands.len());
    let ranked = cands
        .into_iter()
        .take(limit)
        .map(|c| RankedDiscard {
            discard_kind: c.discard_kind,
            shanten_after: c.shanten_after,
            ukeire_total: c.ukeire_total,
            ev: c.expected_value,
            failure_reason: c.failure_reason,
            is_retreat: c.shanten_after > shanten,
            breakdown: c.breakdown,
        })
        .collect();

    Ok(EvaluateResponse { shanten, ranked })
}

#[test]
fn test_evaluate_request_json() {
    let req: EvaluateRequest = serde_json::from_str(
        r#"{"hand": [0, 1, 2], "melds": [{"type": "pon", "kind": 31}], "dora": [4]}"#,
    )
    .unwrap();
    assert_eq!(req.melds, vec![Meld::new(MeldType::Pon, DW, 0)]);
    assert!(req.require_yaku);
    assert_eq!(req.seat_wind, WS);
    assert_eq!(req.limit, None);

    let (hand, visible) = req.to_counts().unwrap();
    assert_eq!(hand.total(), 3);
    assert_eq!(visible.get(DW), 3);
    assert_eq!(visible.get(4), 1);
    assert_eq!(visible.get(0), 1);
}

#[test]
fn test_evaluate_invalid() {
    let oracle = Oracle::default();
    let req = EvaluateRequest::new(vec![0, 1, 34]);
    assert_eq!(evaluate(&oracle, &req), Err(Error::InvalidKind(34)));

    let req = EvaluateRequest::new(vec![5; 5]);
    assert_eq!(evaluate(&oracle, &req), Err(Error::TooManyTiles(5)));

    let mut req = EvaluateRequest::new(vec![5, 5]);
    req.melds.push(Meld::new(MeldType::Minkan, 5, 1));
    assert_eq!(evaluate(&oracle, &req), Err(Error::TooManyTiles(5)));

    let mut req = EvaluateRequest::new(vec![5, 5, 5]);
    req.visible = vec![5];
    req.dora = vec![5];
    assert_eq!(evaluate(&oracle, &req), Err(Error::TooManyTiles(5)));

    // 大量のドラ表示牌
    let mut req = EvaluateRequest::new(kinds_from_str("m22345p345s34567z1"));
    req.dora = vec![0; 60];
    assert_eq!(evaluate(&oracle, &req), Err(Error::TooManyTiles(0)));

    let mut req = EvaluateRequest::new(vec![5, 5]);
    req.seat_wind = DW;
    assert_eq!(evaluate(&oracle, &req), Err(Error::InvalidKind(DW)));
}

#[test]
fn test_evaluate_efficiency() {
    let oracle = Oracle::default();
    let mut req = EvaluateRequest::new(kinds_from_str("m1267p3568s23z157"));
    req.visible = kinds_from_str("p44s4");
    req.limit = Some(5);
    let res = evaluate(&oracle, &req).unwrap();
    assert!(res.shanten >= 1);
    assert_eq!(res.ranked.len(), 5);
    let top = &res.ranked[0];
    assert!(!top.is_retreat);
    assert!(top.ev.is_none());
    for a in &top.breakdown {
        let seen = req.hand.iter().chain(&req.visible).filter(|&&k| k == a.kind).count();
        assert_eq!(a.tiles_left, TILE - seen);
    }
    assert!(res.ranked.iter().all(|r| r.is_retreat == (r.shanten_after > res.shanten)));
}

#[test]
fn test_evaluate_tenpai_and_complete() {
    let oracle = Oracle::default();
    // s9切りで s7, s8 待ち
    let req = EvaluateRequest::new(kinds_from_str("m234567p345s66689"));
    let res = evaluate(&oracle, &req).unwrap();
    assert_eq!(res.shanten, 0);
    let top = &res.ranked[0];
    assert_eq!(top.discard_kind, TS + 8);
    assert!(top.ev.unwrap() > 0);
    assert!(top.failure_reason.is_none());
    // 聴牌を崩す打牌は後退
    assert!(res.ranked.iter().any(|r| r.is_retreat));

    let req = EvaluateRequest::new(kinds_from_str("m234567p345s66688"));
    let res = evaluate(&oracle, &req).unwrap();
    assert_eq!(res.shanten, -1);
    assert!(res.ranked.is_empty());
    let s = serde_json::to_string(&res).unwrap();
    assert_eq!(s, r#"{"shanten":-1,"ranked":[]}"#);
}
