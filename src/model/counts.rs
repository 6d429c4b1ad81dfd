use std::ops::Index as IndexOp;

use serde::ser;

use super::*;

// [TileCounts]
// 牌の種類ごとの枚数 (各要素 0~4)
// 手牌, 場に見えている牌の集計, オラクルへの入力に共通で使用
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCounts([u8; KIND]);

impl Default for TileCounts {
    fn default() -> Self {
        Self([0; KIND])
    }
}

impl TileCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_kinds(kinds: &[Kind]) -> Self {
        let mut tc = Self::new();
        for &k in kinds {
            tc.add(k, 1);
        }
        tc
    }

    pub fn from_tiles(tiles: &[Tile]) -> Self {
        let mut tc = Self::new();
        for t in tiles {
            tc.add(t.kind(), 1);
        }
        tc
    }

    #[inline]
    pub fn get(&self, k: Kind) -> usize {
        self.0[k] as usize
    }

    #[inline]
    pub fn add(&mut self, k: Kind, n: usize) {
        self.0[k] += n as u8;
    }

    #[inline]
    pub fn sub(&mut self, k: Kind, n: usize) {
        debug_assert!(self.get(k) >= n, "{} underflow", kind_symbol(k));
        self.0[k] -= n as u8;
    }

    // 1枚加えた手牌のコピー (元の値は変更しない)
    #[inline]
    pub fn with(&self, k: Kind) -> Self {
        let mut tc = *self;
        tc.add(k, 1);
        tc
    }

    // 1枚除いた手牌のコピー (元の値は変更しない)
    #[inline]
    pub fn without(&self, k: Kind) -> Self {
        let mut tc = *self;
        tc.sub(k, 1);
        tc
    }

    // 見えている牌の記録 現実には同種の牌は4枚までなので4で打ち止め
    pub fn record(&mut self, k: Kind, n: usize) {
        self.0[k] = (self.get(k) + n).min(TILE) as u8;
    }

    // 見えていない残り枚数
    #[inline]
    pub fn left(&self, k: Kind) -> usize {
        TILE.saturating_sub(self.get(k))
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    // 1枚以上存在する牌の (Kind, 枚数)
    pub fn iter(&self) -> impl Iterator<Item = (Kind, usize)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(k, &n)| (k, n as usize))
    }

    // 昇順に展開したKindのリスト
    pub fn to_kinds(&self) -> Vec<Kind> {
        let mut kinds = vec![];
        for (k, n) in self.iter() {
            for _ in 0..n {
                kinds.push(k);
            }
        }
        kinds
    }

    #[inline]
    pub fn as_array(&self) -> &[u8; KIND] {
        &self.0
    }
}

impl IndexOp<Kind> for TileCounts {
    type Output = u8;

    fn index(&self, k: Kind) -> &u8 {
        &self.0[k]
    }
}

impl fmt::Display for TileCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vs: Vec<String> = self.to_kinds().into_iter().map(kind_symbol).collect();
        write!(f, "[{}]", vs.join(", "))
    }
}

impl fmt::Debug for TileCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

// 34要素の配列として出力 (serdeの配列実装は32要素まで)
impl ser::Serialize for TileCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        use ser::SerializeTuple;
        let mut seq = serializer.serialize_tuple(KIND)?;
        for n in &self.0 {
            seq.serialize_element(n)?;
        }
        seq.end()
    }
}

#[test]
fn test_with_without() {
    let hand = TileCounts::from_kinds(&kinds_from_str("m123p55"));
    let h2 = hand.with(TP + 4).without(TM);
    assert_eq!(hand.get(TP + 4), 2);
    assert_eq!(hand.get(TM), 1);
    assert_eq!(h2.get(TP + 4), 3);
    assert_eq!(h2.get(TM), 0);
    assert_eq!(hand.total(), 5);
    assert_eq!(h2.total(), 5);
    assert_eq!(hand.to_kinds(), vec![0, 1, 2, 13, 13]);
}

#[test]
fn test_record_saturates() {
    let mut vis = TileCounts::new();
    vis.record(DR, 3);
    vis.record(DR, 3);
    assert_eq!(vis.get(DR), 4);
    assert_eq!(vis.left(DR), 0);
    assert_eq!(vis.left(DW), 4);
}

#[test]
fn test_counts_json() {
    let tc = TileCounts::from_kinds(&[0, 0, 33]);
    let s = serde_json::to_string(&tc).unwrap();
    assert!(s.starts_with("[2,0,"));
    assert!(s.ends_with(",1]"));
    assert_eq!(s.matches(',').count(), KIND - 1);
}
