use log::{debug, info};

use crate::model::*;
use crate::util::misc::vec_to_string;

// [Stage]
// 1局分の卓の状態. 変更は draw, discard, perform_meld, ron, tsumo を通してのみ行う
// 終了後はいずれの操作もError::GameOverを返却し状態を変更しない
#[derive(Debug, Clone)]
pub struct Stage {
    pub round_wind: Kind,
    pub turn: Seat,
    pub wall: Vec<Tile>,         // 牌山 (末尾から取り出す)
    pub doras: Vec<Tile>,        // ドラ表示牌
    pub visibles: TileCounts,    // 全員に見えている牌 (捨て牌, 副露, ドラ表示牌. 手牌は含まない)
    pub players: [Player; SEAT],
    pub last_discard: Option<(Seat, Tile)>, // 直前の打牌 (鳴き, ロンの対象)
    pub is_over: bool,
    pub winner: Option<Seat>,
}

impl Stage {
    // 配牌: 13枚ずつ順に配り, 親(seat0)に14枚目, 最後にドラ表示牌を1枚公開
    pub fn new(mut wall: Vec<Tile>, round_wind: Kind, initial_score: Score) -> Self {
        assert_eq!(wall.len(), TILE_TOTAL);
        let mut players = [
            Player::new(0, WE, initial_score),
            Player::new(1, WS, initial_score),
            Player::new(2, WW, initial_score),
            Player::new(3, WN, initial_score),
        ];
        for _ in 0..13 {
            for pl in &mut players {
                pl.hand.extend(wall.pop());
            }
        }
        players[0].hand.extend(wall.pop());

        let mut visibles = TileCounts::new();
        let doras: Vec<Tile> = wall.pop().into_iter().collect();
        for d in &doras {
            visibles.add(d.kind(), 1);
        }
        debug!("dora indicator: {}", vec_to_string(&doras));

        Self {
            round_wind,
            turn: 0,
            wall,
            doras,
            visibles,
            players,
            last_discard: None,
            is_over: false,
            winner: None,
        }
    }

    fn check_active(&self, seat: Seat) -> Result<(), Error> {
        if seat >= SEAT {
            return Err(Error::InvalidSeat(seat));
        }
        if self.is_over {
            return Err(Error::GameOver);
        }
        Ok(())
    }

    pub fn dora_kinds(&self) -> Vec<Kind> {
        self.doras.iter().map(|t| t.kind()).collect()
    }

    // ツモ 牌山が空の場合は流局としてOk(false)を返却
    pub fn draw(&mut self, seat: Seat) -> Result<bool, Error> {
        self.check_active(seat)?;
        let t = match self.wall.pop() {
            Some(t) => t,
            None => {
                self.is_over = true;
                self.winner = None;
                info!("exhaustive draw");
                return Ok(false);
            }
        };
        self.players[seat].hand.push(t);
        self.last_discard = None;
        debug!("seat {} draw {}", seat, t);
        Ok(true)
    }

    // 打牌 手番はseatの次の座席に移る
    pub fn discard(&mut self, seat: Seat, kind: Kind) -> Result<Tile, Error> {
        self.check_active(seat)?;
        check_kind(kind)?;
        let pl = &mut self.players[seat];
        let t = pl.take(kind).ok_or(Error::TileNotInHand { seat, kind })?;
        pl.discards.push(t);
        self.visibles.add(kind, 1);
        self.last_discard = Some((seat, t));
        self.turn = (seat + 1) % SEAT;
        debug!("seat {} discard {}", seat, t);
        Ok(t)
    }

    // 鳴きが可能かどうか (ポン, 明槓のみ)
    pub fn check_meld(&self, seat: Seat, kind: Kind, meld_type: MeldType, from: Seat) -> Result<(), Error> {
        self.check_active(seat)?;
        check_kind(kind)?;
        let illegal = Error::IllegalCall {
            seat,
            kind,
            meld_type,
        };
        if from >= SEAT {
            return Err(Error::InvalidSeat(from));
        }
        if from == seat || !matches!(meld_type, MeldType::Pon | MeldType::Minkan) {
            return Err(illegal);
        }
        if self.players[seat].count(kind) < meld_type.consumed() {
            return Err(illegal);
        }
        if !self.players[from].discards.iter().any(|t| t.kind() == kind) {
            return Err(illegal);
        }
        Ok(())
    }

    // 鳴き 手番は鳴いた座席に移る
    // 可視枚数は手牌から晒した分だけ加算 (捨て牌の1枚は打牌時に加算済み)
    pub fn perform_meld(&mut self, seat: Seat, kind: Kind, meld_type: MeldType, from: Seat) -> Result<(), Error> {
        self.check_meld(seat, kind, meld_type, from)?;

        let discards = &mut self.players[from].discards;
        if let Some(pos) = discards.iter().rposition(|t| t.kind() == kind) {
            discards.remove(pos);
        }
        let pl = &mut self.players[seat];
        for _ in 0..meld_type.consumed() {
            pl.take(kind);
        }
        let meld = Meld::new(meld_type, kind, from);
        debug!("seat {} {}", seat, meld);
        pl.melds.push(meld);
        self.visibles.add(kind, meld_type.consumed());
        self.last_discard = None;
        self.turn = seat;
        Ok(())
    }

    // ロン 直前の打牌を和了者の手牌に移して終局
    pub fn ron(&mut self, seat: Seat) -> Result<(), Error> {
        self.check_active(seat)?;
        let (from, t) = match self.last_discard {
            Some((from, t)) if from != seat => (from, t),
            _ => return Err(Error::NotYourTurn { seat, turn: self.turn }),
        };
        self.players[from].discards.pop();
        self.players[seat].hand.push(t);
        self.last_discard = None;
        self.is_over = true;
        self.winner = Some(seat);
        info!("seat {} ron {} from seat {}", seat, t, from);
        Ok(())
    }

    // ツモ和了
    pub fn tsumo(&mut self, seat: Seat) -> Result<(), Error> {
        self.check_active(seat)?;
        self.is_over = true;
        self.winner = Some(seat);
        info!("seat {} tsumo", seat);
        Ok(())
    }

    // 全ての牌の種類について 牌山 + 手牌 + 捨て牌 + 副露 + ドラ表示牌 = 4
    pub fn check_conservation(&self) -> bool {
        let mut tc = [0; KIND];
        let mut add = |k: Kind| tc[k] += 1;
        self.wall.iter().for_each(|t| add(t.kind()));
        self.doras.iter().for_each(|t| add(t.kind()));
        for pl in &self.players {
            pl.hand.iter().for_each(|t| add(t.kind()));
            pl.discards.iter().for_each(|t| add(t.kind()));
            for m in &pl.melds {
                m.kinds().into_iter().for_each(&mut add);
            }
        }
        (0..KIND).all(|k| tc[k] == TILE && self.visibles.get(k) <= TILE)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "turn: {}, wall: {}, dora: {}, over: {}, winner: {:?}",
            self.turn,
            self.wall.len(),
            vec_to_string(&self.doras),
            self.is_over,
            self.winner,
        )?;
        for pl in &self.players {
            writeln!(f, "{}", pl)?;
        }
        Ok(())
    }
}

#[cfg(test)]
use super::wall::{create_wall, create_wall_debug};

#[test]
fn test_stage_new() {
    let stg = Stage::new(create_wall(7), WE, 25000);
    assert_eq!(stg.players[0].hand.len(), 14);
    for s in 1..SEAT {
        assert_eq!(stg.players[s].hand.len(), 13);
        assert!(stg.players[s].needs_draw());
    }
    assert_eq!(stg.wall.len(), TILE_TOTAL - 13 * SEAT - 1 - 1);
    assert_eq!(stg.doras.len(), 1);
    assert_eq!(stg.visibles.total(), 1);
    assert_eq!(stg.visibles.get(stg.doras[0].kind()), 1);
    assert_eq!(stg.players[2].seat_wind, WW);
    assert_eq!(stg.turn, 0);
    assert!(stg.check_conservation());
}

#[test]
fn test_stage_exhaustive_draw() {
    let mut stg = Stage::new(create_wall(3), WE, 25000);
    loop {
        let seat = stg.turn;
        if stg.players[seat].needs_draw() && !stg.draw(seat).unwrap() {
            break;
        }
        let k = stg.players[seat].hand.last().unwrap().kind();
        stg.discard(seat, k).unwrap();
        assert!(stg.check_conservation());
    }
    assert!(stg.is_over);
    assert_eq!(stg.winner, None);
    assert!(stg.wall.is_empty());
    assert!(stg.check_conservation());

    // 終局後は状態を変更しない
    let seat = stg.turn;
    let k = stg.players[seat].hand[0].kind();
    assert_eq!(stg.draw(seat), Err(Error::GameOver));
    assert_eq!(stg.discard(seat, k), Err(Error::GameOver));
    assert_eq!(stg.tsumo(seat), Err(Error::GameOver));
    assert_eq!(stg.players[seat].hand.len(), 13);
}

#[test]
fn test_stage_illegal_discard() {
    // 13枚 + 配牌14枚目のm9
    let hand0 = kinds_from_str("m1112345678999");
    let mut stg = Stage::new(create_wall_debug(0, Some(DR), [&hand0[..], &[], &[], &[]], &[TM + 8]), WE, 25000);
    assert_eq!(stg.players[0].count(TM + 8), 4);
    let before = stg.clone();

    assert_eq!(stg.discard(0, TP), Err(Error::TileNotInHand { seat: 0, kind: TP }));
    assert_eq!(stg.discard(0, KIND), Err(Error::InvalidKind(KIND)));
    assert_eq!(stg.discard(SEAT, TM), Err(Error::InvalidSeat(SEAT)));
    assert_eq!(stg.players[0].hand, before.players[0].hand);
    assert!(stg.players[0].discards.is_empty());
    assert_eq!(stg.visibles, before.visibles);
    assert_eq!(stg.turn, 0);

    assert!(stg.discard(0, TM + 8).is_ok());
    assert_eq!(stg.players[0].count(TM + 8), 3);
    assert_eq!(stg.turn, 1);
}

#[test]
fn test_stage_pon() {
    let hand0 = kinds_from_str("m123456789s1234");
    let hand1 = kinds_from_str("m1357p55s2468z123");
    let wall = create_wall_debug(1, Some(DR), [&hand0[..13], &hand1[..], &[], &[]], &[TP + 4]);
    let mut stg = Stage::new(wall, WE, 25000);
    let visible_before = stg.visibles.get(TP + 4);

    stg.discard(0, TP + 4).unwrap();
    assert_eq!(stg.turn, 1);

    assert!(stg.check_meld(0, TP + 4, MeldType::Pon, 0).is_err());
    assert!(stg.check_meld(1, TP + 4, MeldType::Minkan, 0).is_err()); // 2枚しかない
    assert!(stg.check_meld(1, TP + 4, MeldType::Chi, 0).is_err());
    assert!(stg.check_meld(1, TP + 4, MeldType::Pon, 2).is_err()); // seat2は捨てていない

    stg.perform_meld(1, TP + 4, MeldType::Pon, 0).unwrap();
    let pl = &stg.players[1];
    assert_eq!(pl.count(TP + 4), 0);
    assert_eq!(pl.hand.len(), 11);
    assert!(!pl.needs_draw()); // ツモらずに打牌
    assert_eq!(pl.melds, vec![Meld::new(MeldType::Pon, TP + 4, 0)]);
    assert!(stg.players[0].discards.is_empty());
    assert_eq!(stg.visibles.get(TP + 4), visible_before + 3);
    assert_eq!(stg.turn, 1);
    assert!(stg.check_conservation());
}

#[test]
fn test_stage_ron() {
    let hand0 = kinds_from_str("m123456789s1234");
    let hand2 = kinds_from_str("m123456789p46z11");
    let wall = create_wall_debug(2, Some(DR), [&hand0[..13], &[], &hand2[..], &[]], &[TP + 4]);
    let mut stg = Stage::new(wall, WE, 25000);

    stg.discard(0, TP + 4).unwrap();
    assert!(stg.ron(0).is_err()); // 自分の打牌
    stg.ron(2).unwrap();
    assert!(stg.is_over);
    assert_eq!(stg.winner, Some(2));
    assert_eq!(stg.players[2].hand.len(), 14);
    assert_eq!(stg.players[2].count(TP + 4), 1);
    assert!(stg.players[0].discards.is_empty());
    assert!(stg.check_conservation());
    assert_eq!(stg.discard(1, TM), Err(Error::GameOver));
}
