use super::*;
use crate::util::misc::vec_to_string;

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub seat: Seat,          // 座席番号
    pub seat_wind: Kind,     // 自風 (WE~WN)
    pub score: Score,        // 得点
    pub hand: Vec<Tile>,     // 手牌 (取得順)
    pub discards: Vec<Tile>, // 捨て牌一覧 (鳴かれた牌, ロンされた牌は除かれる)
    pub melds: Vec<Meld>,    // 鳴き一覧
    pub is_riichi: bool,     // リーチ
}

impl Player {
    pub fn new(seat: Seat, seat_wind: Kind, score: Score) -> Self {
        Self {
            seat,
            seat_wind,
            score,
            hand: vec![],
            discards: vec![],
            melds: vec![],
            is_riichi: false,
        }
    }

    pub fn counts(&self) -> TileCounts {
        TileCounts::from_tiles(&self.hand)
    }

    pub fn count(&self, k: Kind) -> usize {
        self.hand.iter().filter(|t| t.kind() == k).count()
    }

    // 手牌が 3n+1 枚の場合はツモが必要 (3n+2 枚なら打牌待ち)
    #[inline]
    pub fn needs_draw(&self) -> bool {
        self.hand.len() % 3 == 1
    }

    // 指定した種類の牌を手牌から1枚取り除く 取得が新しいものを優先
    pub fn take(&mut self, k: Kind) -> Option<Tile> {
        let pos = self.hand.iter().rposition(|t| t.kind() == k)?;
        Some(self.hand.remove(pos))
    }

    pub fn discard_kinds(&self) -> Vec<Kind> {
        self.discards.iter().map(|t| t.kind()).collect()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hand = self.hand.clone();
        hand.sort();
        writeln!(
            f,
            "seat: {}, wind: {}, score: {}, riichi: {}",
            self.seat,
            kind_symbol(self.seat_wind),
            self.score,
            self.is_riichi,
        )?;
        writeln!(f, "hand: {}", vec_to_string(&hand))?;
        writeln!(f, "melds: {}", vec_to_string(&self.melds))?;
        write!(f, "discards: {}", vec_to_string(&self.discards))
    }
}

#[test]
fn test_player_take() {
    let mut pl = Player::new(0, WE, 25000);
    pl.hand = vec![Tile(0), Tile(5), Tile(1), Tile(9)];
    assert!(pl.needs_draw());
    assert_eq!(pl.count(0), 2);
    assert_eq!(pl.take(0), Some(Tile(1)));
    assert_eq!(pl.take(DR), None);
    assert_eq!(pl.hand, vec![Tile(0), Tile(5), Tile(9)]);
    assert_eq!(pl.counts().get(2), 1);
}
