use serde::ser;

use super::*;

// [Kind]
// 牌の種類 (0~33). 数牌は 種別 * 9 + (数字 - 1), 字牌は 27~33 (東南西北白發中)

#[inline]
pub fn is_valid_kind(k: Kind) -> bool {
    k < KIND
}

// 境界での入力チェック
pub fn check_kind(k: Kind) -> Result<Kind, Error> {
    if is_valid_kind(k) {
        Ok(k)
    } else {
        Err(Error::InvalidKind(k))
    }
}

// 数牌
#[inline]
pub fn is_suit(k: Kind) -> bool {
    k < TZ
}

// 字牌
#[inline]
pub fn is_honor(k: Kind) -> bool {
    TZ <= k && k < KIND
}

// 数牌の数字 (1~9), 字牌の場合は 1~7
#[inline]
pub fn rank(k: Kind) -> usize {
    if is_suit(k) {
        k % 9 + 1
    } else {
        k - TZ + 1
    }
}

// 1,9牌
#[inline]
pub fn is_terminal(k: Kind) -> bool {
    is_suit(k) && (rank(k) == 1 || rank(k) == 9)
}

// 么九牌
#[inline]
pub fn is_end(k: Kind) -> bool {
    is_honor(k) || is_terminal(k)
}

// 中張牌
#[inline]
pub fn is_simple(k: Kind) -> bool {
    !is_end(k)
}

// 風牌
#[inline]
pub fn is_wind(k: Kind) -> bool {
    (WE..=WN).contains(&k)
}

// 三元牌
#[inline]
pub fn is_doragon(k: Kind) -> bool {
    (DW..=DR).contains(&k)
}

// ドラ表示牌から実際のドラを返却
// 数牌: 9 -> 1, 風牌: 北 -> 東, 三元牌: 中 -> 白
pub fn dora_from_indicator(k: Kind) -> Kind {
    if is_suit(k) {
        k / 9 * 9 + (k % 9 + 1) % 9
    } else if is_wind(k) {
        WE + (k - WE + 1) % 4
    } else {
        DW + (k - DW + 1) % 3
    }
}

pub fn kind_symbol(k: Kind) -> String {
    if !is_valid_kind(k) {
        return "??".to_string();
    }
    format!("{}{}", ['m', 'p', 's', 'z'][k / 9], rank(k))
}

// テスト用: "m123p55z111" 形式の文字列をKindのリストに変換
#[cfg(test)]
pub fn kinds_from_str(exp: &str) -> Vec<Kind> {
    let mut kinds = vec![];
    let mut base = None;
    for c in exp.chars() {
        match c {
            'm' => base = Some(TM),
            'p' => base = Some(TP),
            's' => base = Some(TS),
            'z' => base = Some(TZ),
            '1'..='9' => {
                let b = base.expect("tile number before tile type");
                kinds.push(b + c.to_digit(10).unwrap() as usize - 1);
            }
            _ => panic!("invalid char: '{}'", c),
        }
    }
    kinds
}

// [Tile]
// 物理的な牌 (0~135). 同じKindの牌が4枚ずつ存在する
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile(pub usize);

impl Tile {
    #[inline]
    pub fn kind(self) -> Kind {
        self.0 / TILE
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", kind_symbol(self.kind()))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self, self.0)
    }
}

// 外部には物理的な区別を見せずKindとして出力
impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_u64(self.kind() as u64)
    }
}

#[test]
fn test_dora_from_indicator() {
    assert_eq!(dora_from_indicator(TM), TM + 1); // m1 -> m2
    assert_eq!(dora_from_indicator(TM + 8), TM); // m9 -> m1
    assert_eq!(dora_from_indicator(TP + 8), TP); // p9 -> p1
    assert_eq!(dora_from_indicator(TS + 4), TS + 5); // s5 -> s6
    assert_eq!(dora_from_indicator(WE), WS);
    assert_eq!(dora_from_indicator(WN), WE);
    assert_eq!(dora_from_indicator(DW), DG);
    assert_eq!(dora_from_indicator(DR), DW);
}

#[test]
fn test_kind_class() {
    let ks = kinds_from_str("m19p5s2z17");
    assert_eq!(ks, vec![0, 8, 13, 19, 27, 33]);
    assert!(is_terminal(0) && is_terminal(8) && !is_terminal(27));
    assert!(is_simple(13) && is_simple(19));
    assert!(is_end(27) && is_end(33));
    assert!(is_wind(WN) && !is_wind(DW));
    assert!(is_doragon(DR) && !is_doragon(WN));
    assert_eq!(kind_symbol(13), "p5");
    assert_eq!(check_kind(34), Err(Error::InvalidKind(34)));
    assert_eq!(Tile(135).kind(), DR);
}
