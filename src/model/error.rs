use std::error;

use super::*;

// ライブラリ全体のエラー
// 呼び出し側の誤用を表す. 流局や役なしなどゲーム上の結果はここに含めない
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidKind(usize),                // 牌の種類が範囲外 (0~33)
    InvalidSeat(usize),                // 座席が範囲外 (0~3)
    TooManyTiles(Kind),                // 同種の牌が4枚を超える
    TileNotInHand { seat: Seat, kind: Kind },
    GameOver,                          // 終了済みの対局への操作
    NoMatch,                           // 対局が開始されていない
    NotYourTurn { seat: Seat, turn: Seat },
    HumanTurn,                         // 人間の手番にAIを進めようとした
    PendingCall,                       // 鳴きの選択待ち
    NoPendingCall,                     // 選択待ちの鳴きがない
    IllegalCall { seat: Seat, kind: Kind, meld_type: MeldType },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKind(k) => write!(f, "invalid tile kind: {}", k),
            Error::InvalidSeat(s) => write!(f, "invalid seat: {}", s),
            Error::TooManyTiles(k) => write!(f, "more than {} tiles of {}", TILE, kind_symbol(*k)),
            Error::TileNotInHand { seat, kind } => {
                write!(f, "{} not found in hand of seat {}", kind_symbol(*kind), seat)
            }
            Error::GameOver => write!(f, "match is already over"),
            Error::NoMatch => write!(f, "no match"),
            Error::NotYourTurn { seat, turn } => {
                write!(f, "seat {} is not in turn (turn: {})", seat, turn)
            }
            Error::HumanTurn => write!(f, "human turn"),
            Error::PendingCall => write!(f, "call decision is pending"),
            Error::NoPendingCall => write!(f, "no pending call"),
            Error::IllegalCall {
                seat,
                kind,
                meld_type,
            } => write!(
                f,
                "seat {} cannot {} {}",
                seat,
                meld_type,
                kind_symbol(*kind)
            ),
        }
    }
}

impl error::Error for Error {}

#[test]
fn test_error_display() {
    let e = Error::TileNotInHand { seat: 1, kind: DR };
    assert_eq!(e.to_string(), "z7 not found in hand of seat 1");
    let e = Error::IllegalCall {
        seat: 0,
        kind: TP,
        meld_type: MeldType::Pon,
    };
    assert_eq!(e.to_string(), "seat 0 cannot pon p1");
}
