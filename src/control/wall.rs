use rand::prelude::*;

use crate::model::*;

// 牌山は末尾から順に配牌, ドラ表示牌, ツモの順で取り出す
pub fn create_wall(seed: u64) -> Vec<Tile> {
    let mut wall: Vec<Tile> = (0..TILE_TOTAL).map(Tile).collect();
    let mut rng: StdRng = SeedableRng::seed_from_u64(seed);
    wall.shuffle(&mut rng);
    wall
}

// テスト用に作為的な牌山を生成 指定がない場所はシード値に従ってランダムに生成
// hands: 各座席の配牌 (最大13枚)
// deal: ツモ山 最初の牌は親番の14枚目, 以降はドラ表示牌の後に順にツモられる
pub fn create_wall_debug(
    seed: u64,
    dora: Option<Kind>,
    hands: [&[Kind]; SEAT],
    deal: &[Kind],
) -> Vec<Tile> {
    let mut used = [0; KIND];
    let mut take = |k: Kind| {
        assert!(used[k] < TILE, "more than 4 tiles of {}", kind_symbol(k));
        used[k] += 1;
        Tile(k * TILE + used[k] - 1)
    };

    let mut fixed_hands: [Vec<Tile>; SEAT] = Default::default();
    for s in 0..SEAT {
        assert!(hands[s].len() <= 13);
        fixed_hands[s] = hands[s].iter().map(|&k| take(k)).collect();
    }
    let fixed_deal: Vec<Tile> = deal.iter().map(|&k| take(k)).collect();
    let fixed_dora = dora.map(&mut take);

    // 余った牌をランダムにシャッフル
    let mut remain: Vec<Tile> = (0..TILE_TOTAL)
        .map(Tile)
        .filter(|t| t.0 % TILE >= used[t.kind()])
        .collect();
    let mut rng: StdRng = SeedableRng::seed_from_u64(seed);
    remain.shuffle(&mut rng);

    let mut next = |fixed: Option<Tile>| fixed.or_else(|| remain.pop());

    // 取り出される順に並べてから反転
    let mut order = vec![];
    for i in 0..13 {
        for h in &fixed_hands {
            order.push(next(h.get(i).copied()));
        }
    }
    let mut deal_iter = fixed_deal.into_iter();
    order.push(next(deal_iter.next()));
    order.push(next(fixed_dora));
    for t in deal_iter {
        order.push(Some(t));
    }
    while let Some(t) = remain.pop() {
        order.push(Some(t));
    }

    let mut wall: Vec<Tile> = order.into_iter().flatten().collect();
    assert_eq!(wall.len(), TILE_TOTAL);
    wall.reverse();
    wall
}

#[test]
fn test_create_wall() {
    let wall = create_wall(1);
    assert_eq!(wall.len(), TILE_TOTAL);
    let tc = TileCounts::from_tiles(&wall);
    assert!((0..KIND).all(|k| tc.get(k) == TILE));
    assert_eq!(wall, create_wall(1));
    assert_ne!(wall, create_wall(2));
}

#[test]
fn test_create_wall_debug() {
    let hand0 = kinds_from_str("m1112345678999");
    let wall = create_wall_debug(0, Some(DR), [&hand0[..13], &[], &[], &[]], &[TM + 8, WE]);
    assert_eq!(wall.len(), TILE_TOTAL);
    let tc = TileCounts::from_tiles(&wall);
    assert!((0..KIND).all(|k| tc.get(k) == TILE));

    // 末尾から取り出される
    let n = wall.len();
    assert_eq!(wall[n - 1].kind(), TM); // seat0の1枚目
    assert_eq!(wall[n - 5].kind(), TM); // seat0の2枚目
    assert_eq!(wall[n - 53].kind(), TM + 8); // 親番の14枚目
    assert_eq!(wall[n - 54].kind(), DR); // ドラ表示牌
    assert_eq!(wall[n - 55].kind(), WE); // 最初のツモ
}
