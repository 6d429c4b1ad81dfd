use crate::model::*;

// 向聴数の計算
// -1: 和了形, 0: 聴牌, 1以上: 和了までに必要な牌の交換回数
// 鳴きは渡さない. 副露数は手牌の枚数(3n+1, 3n+2)から逆算する
pub trait ShantenOracle {
    fn shanten(&self, hand: &TileCounts) -> i32;
}

// 通常形, 七対子, 国士無双の最小値
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardShanten;

impl ShantenOracle for StandardShanten {
    fn shanten(&self, hand: &TileCounts) -> i32 {
        calc_shanten(hand)
    }
}

pub fn calc_shanten(hand: &TileCounts) -> i32 {
    let mut sh = calc_normal_shanten(hand);
    if hand.total() >= 13 {
        sh = sh.min(calc_chiitoitsu_shanten(hand));
        sh = sh.min(calc_kokushimusou_shanten(hand));
    }
    sh
}

// [通常形]
// 向聴数 = 2 * (必要な面子数 - 面子数) - 塔子数 - 雀頭
// ただし 面子数 + 塔子数 <= 必要な面子数
// 萬子,筒子,索子,字牌それぞれで面子と塔子の取り方を列挙してから組み合わせる
pub fn calc_normal_shanten(hand: &TileCounts) -> i32 {
    let tiles = hand.as_array();
    let n_block = (hand.total() / 3) as i32;
    let groups = [
        calc_group_blocks(&tiles[TM..TP], true),
        calc_group_blocks(&tiles[TP..TS], true),
        calc_group_blocks(&tiles[TS..TZ], true),
        calc_group_blocks(&tiles[TZ..KIND], false),
    ];

    let mut min = i32::MAX;
    combine_groups(&groups, 0, (0, 0, 0), n_block, &mut min);
    min
}

// (面子数, 塔子数, 雀頭数)
type Blocks = (i32, i32, i32);

fn combine_groups(groups: &[Vec<Blocks>], i: usize, acc: Blocks, n_block: i32, min: &mut i32) {
    if i == groups.len() {
        let (n_set, n_partial, n_pair) = acc;
        let n_partial = n_partial.min(n_block - n_set);
        *min = (*min).min(2 * (n_block - n_set) - n_partial - n_pair);
        return;
    }

    for &(m, t, p) in &groups[i] {
        if acc.2 + p > 1 {
            continue; // 雀頭は1つまで
        }
        combine_groups(groups, i + 1, (acc.0 + m, acc.1 + t, acc.2 + p), n_block, min);
    }
}

// 1つの牌種で取りうる (面子数, 塔子数, 雀頭数) の一覧
// 面子数と雀頭数が同じものは塔子数が最大のもののみを残す
fn calc_group_blocks(row: &[u8], is_suit: bool) -> Vec<Blocks> {
    let mut search = GroupSearch {
        tiles: row.to_vec(),
        is_suit,
        found: vec![],
    };

    search.scan_sets(0, 0, 0);
    for i in 0..row.len() {
        if search.tiles[i] >= 2 {
            search.tiles[i] -= 2;
            search.scan_sets(0, 0, 1);
            search.tiles[i] += 2;
        }
    }

    let mut res = search.found;
    res.sort_by(|a, b| (a.0, a.2, b.1).cmp(&(b.0, b.2, a.1)));
    res.dedup_by(|a, b| a.0 == b.0 && a.2 == b.2);
    res
}

struct GroupSearch {
    tiles: Vec<u8>,
    is_suit: bool,
    found: Vec<Blocks>,
}

impl GroupSearch {
    fn next_index(&self, mut i: usize) -> usize {
        while i < self.tiles.len() && self.tiles[i] == 0 {
            i += 1;
        }
        i
    }

    // 面子(刻子, 順子)を抜き出す
    fn scan_sets(&mut self, start: usize, n_set: i32, n_pair: i32) {
        let i = self.next_index(start);
        if i == self.tiles.len() {
            self.scan_partials(0, n_set, 0, n_pair);
            return;
        }

        if self.tiles[i] >= 3 {
            self.tiles[i] -= 3;
            self.scan_sets(i, n_set + 1, n_pair);
            self.tiles[i] += 3;
        }

        if self.is_suit && i + 2 < self.tiles.len() && self.tiles[i + 1] > 0 && self.tiles[i + 2] > 0 {
            self.tiles[i] -= 1;
            self.tiles[i + 1] -= 1;
            self.tiles[i + 2] -= 1;
            self.scan_sets(i, n_set + 1, n_pair);
            self.tiles[i] += 1;
            self.tiles[i + 1] += 1;
            self.tiles[i + 2] += 1;
        }

        // iの残りは塔子の探索に回す
        self.scan_sets(i + 1, n_set, n_pair);
    }

    // 塔子(対子, 両面・辺張, 嵌張)を抜き出す
    fn scan_partials(&mut self, start: usize, n_set: i32, n_partial: i32, n_pair: i32) {
        let i = self.next_index(start);
        if i == self.tiles.len() {
            self.found.push((n_set, n_partial, n_pair));
            return;
        }

        if self.tiles[i] >= 2 {
            self.tiles[i] -= 2;
            self.scan_partials(i, n_set, n_partial + 1, n_pair);
            self.tiles[i] += 2;
        }
        if self.is_suit && i + 1 < self.tiles.len() && self.tiles[i + 1] > 0 {
            self.tiles[i] -= 1;
            self.tiles[i + 1] -= 1;
            self.scan_partials(i, n_set, n_partial + 1, n_pair);
            self.tiles[i] += 1;
            self.tiles[i + 1] += 1;
        }
        if self.is_suit && i + 2 < self.tiles.len() && self.tiles[i + 2] > 0 {
            self.tiles[i] -= 1;
            self.tiles[i + 2] -= 1;
            self.scan_partials(i, n_set, n_partial + 1, n_pair);
            self.tiles[i] += 1;
            self.tiles[i + 2] += 1;
        }

        // 孤立牌
        self.scan_partials(i + 1, n_set, n_partial, n_pair);
    }
}

// [七対子]
pub fn calc_chiitoitsu_shanten(hand: &TileCounts) -> i32 {
    let mut n_pair = 0;
    let mut n_kind = 0;
    for (_, n) in hand.iter() {
        n_kind += 1;
        if n >= 2 {
            n_pair += 1;
        }
    }
    // 同じ牌の4枚使いは2対子とみなさない
    6 - n_pair + (7 - n_kind).max(0)
}

// [国士無双]
pub fn calc_kokushimusou_shanten(hand: &TileCounts) -> i32 {
    let mut n_kind = 0;
    let mut has_pair = false;
    for k in 0..KIND {
        if is_end(k) && hand.get(k) > 0 {
            n_kind += 1;
            if hand.get(k) >= 2 {
                has_pair = true;
            }
        }
    }
    13 - n_kind - has_pair as i32
}

#[cfg(test)]
fn sh(exp: &str) -> i32 {
    calc_shanten(&TileCounts::from_kinds(&kinds_from_str(exp)))
}

#[test]
fn test_normal_shanten() {
    assert_eq!(sh("m123456789p123z11"), -1);
    assert_eq!(sh("m123456789p12z11"), 0); // 辺張待ち
    assert_eq!(sh("m123456789p23s67"), 1); // 雀頭なし両面2つ
    assert_eq!(sh("m123p456s789z1234"), 2); // 字牌の単騎
    assert_eq!(sh("m111222333p789s5"), 0); // 単騎
    assert_eq!(calc_normal_shanten(&TileCounts::from_kinds(&kinds_from_str("m147p258s369z1234"))), 8);
    assert_eq!(sh("m147p258s369z1234"), 6); // 七対子の6向聴
}

#[test]
fn test_melded_hand_shanten() {
    // 1副露: 11枚
    assert_eq!(sh("m123456p789s11"), -1);
    assert_eq!(sh("m123456p789s1"), 0);
    assert_eq!(sh("m123456p78s11"), 0);
    // 4副露: 裸単騎
    assert_eq!(sh("z7"), 0);
    assert_eq!(sh("z77"), -1);
}

#[test]
fn test_chiitoitsu_shanten() {
    assert_eq!(sh("m1133p2255s7799z11"), -1);
    assert_eq!(sh("m1133p2255s7799z1"), 0);
    assert_eq!(calc_chiitoitsu_shanten(&TileCounts::from_kinds(&kinds_from_str("m1111p2255s7799z1"))), 2);
}

#[test]
fn test_kokushimusou_shanten() {
    assert_eq!(sh("m19p19s19z12345677"), -1);
    assert_eq!(sh("m19p19s19z1234567"), 0);
    assert_eq!(sh("m19p19s19z1234566"), 0);
    assert_eq!(calc_kokushimusou_shanten(&TileCounts::from_kinds(&kinds_from_str("m159p19s19z123456"))), 1);
}

#[test]
fn test_oracle_trait() {
    let oracle: Box<dyn ShantenOracle> = Box::new(StandardShanten);
    let hand = TileCounts::from_kinds(&kinds_from_str("m123456789p12z11"));
    assert_eq!(oracle.shanten(&hand), 0);
    assert_eq!(oracle.shanten(&hand.with(TP + 2)), -1);
    assert_eq!(oracle.shanten(&hand.with(TP + 5)), 0);
}
