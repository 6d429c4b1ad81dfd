use crate::model::*;

// ドラ表示牌からドラの枚数表を作成
// 同じ表示牌が複数ある場合はその分だけ加算される
pub fn create_dora_table(indicators: &[Kind]) -> [usize; KIND] {
    let mut dt = [0; KIND];
    for &k in indicators {
        dt[dora_from_indicator(k)] += 1;
    }
    dt
}

// ドラの種類 (重複なし, 昇順)
pub fn dora_kinds(indicators: &[Kind]) -> Vec<Kind> {
    let dt = create_dora_table(indicators);
    (0..KIND).filter(|&k| dt[k] > 0).collect()
}

// 手牌と副露に含まれるドラの数
pub fn count_dora(hand: &TileCounts, melds: &[Meld], indicators: &[Kind]) -> usize {
    let dt = create_dora_table(indicators);
    let mut n_dora = 0;
    for (k, n) in hand.iter() {
        n_dora += dt[k] * n;
    }
    for m in melds {
        for k in m.kinds() {
            n_dora += dt[k];
        }
    }
    n_dora
}

#[test]
fn test_dora() {
    // 表示牌: m9, z4, z4
    let indicators = [TM + 8, WN, WN];
    assert_eq!(dora_kinds(&indicators), vec![TM, WE]);

    let hand = TileCounts::from_kinds(&kinds_from_str("m1123z11"));
    let melds = [Meld::new(MeldType::Pon, WE, 1)];
    // m1: 2枚 * 1, z1: (2 + 3)枚 * 2
    assert_eq!(count_dora(&hand, &melds, &indicators), 2 + 10);
    assert_eq!(count_dora(&hand, &[], &[]), 0);
}
