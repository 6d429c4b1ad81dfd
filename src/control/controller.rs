use log::{debug, info, warn};
use serde::Serialize;

use super::stage::Stage;
use crate::actor::Actor;
use crate::hand::Oracle;
use crate::model::*;

// 人間の座席への鳴きの提示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallOffer {
    pub seat: Seat,
    pub kind: Kind,
    pub discarder: Seat,
    pub meld_types: Vec<MeldType>, // 明槓を優先して並べる
}

// [MatchController]
// Stageと各座席のActorを保持し, 打牌後の割り込み(ロン, 鳴き)を解決する
// actorsがNoneの座席は人間 (外部から human_discard, accept_meld, decline_meld で操作)
#[derive(Debug)]
pub struct MatchController {
    stage: Stage,
    actors: [Option<Box<dyn Actor>>; SEAT],
    pending: Option<CallOffer>,
}

impl MatchController {
    pub fn new(stage: Stage, actors: [Option<Box<dyn Actor>>; SEAT]) -> Self {
        Self {
            stage,
            actors,
            pending: None,
        }
    }

    // 配牌直後の処理 (人間が親でない場合は何もしない)
    pub fn start(&mut self, oracle: &Oracle) -> Result<(), Error> {
        self.prepare_human_turn(oracle)
    }

    #[inline]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    #[inline]
    pub fn pending_call(&self) -> Option<&CallOffer> {
        self.pending.as_ref()
    }

    pub fn human_seat(&self) -> Option<Seat> {
        self.actors.iter().position(|a| a.is_none())
    }

    pub fn is_over(&self) -> bool {
        self.stage.is_over
    }

    fn check_ready(&self) -> Result<(), Error> {
        if self.stage.is_over {
            return Err(Error::GameOver);
        }
        if self.pending.is_some() {
            return Err(Error::PendingCall);
        }
        Ok(())
    }

    // 人間の打牌
    pub fn human_discard(&mut self, oracle: &Oracle, kind: Kind) -> Result<(), Error> {
        check_kind(kind)?;
        self.check_ready()?;
        let seat = self.human_seat().ok_or(Error::InvalidSeat(NO_SEAT))?;
        let turn = self.stage.turn;
        if turn != seat || self.stage.players[seat].needs_draw() {
            return Err(Error::NotYourTurn { seat, turn });
        }

        self.stage.discard(seat, kind)?;
        self.after_discard(oracle, seat, kind)
    }

    // AIの手番を1つ進める (ツモ, 打牌, 割り込みの解決)
    pub fn advance_scripted_seat(&mut self, oracle: &Oracle) -> Result<(), Error> {
        self.check_ready()?;
        let seat = self.stage.turn;
        let actor = match self.actors[seat].as_mut() {
            Some(a) => a,
            None => return Err(Error::HumanTurn),
        };

        // 鳴いた直後(ポン)はツモらずに打牌する
        if self.stage.players[seat].needs_draw() {
            if !self.stage.draw(seat)? {
                return Ok(()); // 流局
            }
            if oracle.shanten.shanten(&self.stage.players[seat].counts()) == -1 {
                return self.stage.tsumo(seat);
            }
        }

        let mut kind = actor.select_discard(&self.stage, seat, oracle);
        let pl = &self.stage.players[seat];
        if pl.count(kind) == 0 {
            // 最後に取得した牌
            let last = pl.hand.last().map(|t| t.kind()).ok_or(Error::TileNotInHand { seat, kind })?;
            warn!("{:?} selected {} not in hand. discard {} instead", actor, kind_symbol(kind), kind_symbol(last));
            kind = last;
        }

        self.stage.discard(seat, kind)?;
        self.after_discard(oracle, seat, kind)
    }

    // 人間以外の手番を人間の手番, 鳴きの選択待ち, 終局のいずれかまで進める
    pub fn advance_until_human(&mut self, oracle: &Oracle) -> Result<(), Error> {
        while !self.stage.is_over && self.pending.is_none() && Some(self.stage.turn) != self.human_seat() {
            self.advance_scripted_seat(oracle)?;
        }
        Ok(())
    }

    // 提示された鳴きを受ける
    pub fn accept_meld(&mut self, oracle: &Oracle, kind: Kind, meld_type: MeldType, discarder: Seat) -> Result<(), Error> {
        check_kind(kind)?;
        if self.stage.is_over {
            return Err(Error::GameOver);
        }
        let offer = self.pending.as_ref().ok_or(Error::NoPendingCall)?;
        let seat = offer.seat;
        if offer.kind != kind || offer.discarder != discarder || !offer.meld_types.contains(&meld_type) {
            return Err(Error::IllegalCall {
                seat,
                kind,
                meld_type,
            });
        }

        self.stage.perform_meld(seat, kind, meld_type, discarder)?;
        self.pending = None;
        self.prepare_human_turn(oracle)
    }

    // 提示された鳴きを見送る 手番は打牌者の次の座席のまま
    pub fn decline_meld(&mut self, oracle: &Oracle) -> Result<(), Error> {
        if self.stage.is_over {
            return Err(Error::GameOver);
        }
        let offer = self.pending.take().ok_or(Error::NoPendingCall)?;
        debug!("seat {} declined {:?}", offer.seat, offer.meld_types);
        self.prepare_human_turn(oracle)
    }

    // 打牌後の割り込み: ロン > AIの鳴き > 人間への鳴きの提示
    // いずれも打牌者の下家から順に判定し, 最初に成立したもので打ち切る
    fn after_discard(&mut self, oracle: &Oracle, discarder: Seat, kind: Kind) -> Result<(), Error> {
        let others: Vec<Seat> = (1..SEAT).map(|i| (discarder + i) % SEAT).collect();

        for &s in &others {
            let hand = self.stage.players[s].counts();
            if oracle.shanten.shanten(&hand.with(kind)) == -1 {
                return self.stage.ron(s);
            }
        }

        for &s in &others {
            let actor = match self.actors[s].as_mut() {
                Some(a) => a,
                None => continue,
            };
            let meld_type = match self.stage.players[s].count(kind) {
                3 => MeldType::Minkan,
                2 => MeldType::Pon,
                _ => continue,
            };
            if actor.select_call(&self.stage, s, kind, meld_type) {
                return self.stage.perform_meld(s, kind, meld_type, discarder);
            }
        }

        if let Some(h) = self.human_seat() {
            if h != discarder {
                let meld_types = match self.stage.players[h].count(kind) {
                    3 => vec![MeldType::Minkan, MeldType::Pon],
                    2 => vec![MeldType::Pon],
                    _ => vec![],
                };
                if !meld_types.is_empty() {
                    let offer = CallOffer {
                        seat: h,
                        kind,
                        discarder,
                        meld_types,
                    };
                    debug!("call offer: {:?}", offer);
                    self.pending = Some(offer);
                    return Ok(());
                }
            }
        }

        self.prepare_human_turn(oracle)
    }

    // 人間の手番であればツモを行い, 和了形ならツモ和了とする
    fn prepare_human_turn(&mut self, oracle: &Oracle) -> Result<(), Error> {
        let h = match self.human_seat() {
            Some(h) => h,
            None => return Ok(()),
        };
        if self.stage.is_over || self.pending.is_some() || self.stage.turn != h {
            return Ok(());
        }
        if !self.stage.players[h].needs_draw() {
            return Ok(());
        }

        if self.stage.draw(h)? && oracle.shanten.shanten(&self.stage.players[h].counts()) == -1 {
            info!("seat {} (human) completed by self-draw", h);
            self.stage.tsumo(h)?;
        }
        Ok(())
    }
}

// テスト用: ツモ切りし, 鳴くかどうかは固定
#[cfg(test)]
#[derive(Debug)]
struct FixedActor {
    call: bool,
}

#[cfg(test)]
impl Actor for FixedActor {
    fn select_discard(&mut self, stg: &Stage, seat: Seat, _oracle: &Oracle) -> Kind {
        stg.players[seat].hand.last().map(|t| t.kind()).unwrap_or(NO_KIND)
    }

    fn select_call(&mut self, _stg: &Stage, _seat: Seat, _kind: Kind, _meld_type: MeldType) -> bool {
        self.call
    }

    fn get_name(&self) -> String {
        format!("FixedActor(call={})", self.call)
    }
}

#[cfg(test)]
fn fixed_actors(calls: [bool; SEAT], human_seat: Option<Seat>) -> [Option<Box<dyn Actor>>; SEAT] {
    let mut actors: [Option<Box<dyn Actor>>; SEAT] = Default::default();
    for s in 0..SEAT {
        if Some(s) != human_seat {
            actors[s] = Some(Box::new(FixedActor { call: calls[s] }));
        }
    }
    actors
}

#[cfg(test)]
fn debug_stage(hands: [&str; SEAT], deal: &[Kind]) -> Stage {
    use super::wall::create_wall_debug;
    let hs: Vec<Vec<Kind>> = hands.iter().map(|h| kinds_from_str(h)).collect();
    let wall = create_wall_debug(9, Some(DR), [&hs[0][..], &hs[1][..], &hs[2][..], &hs[3][..]], deal);
    Stage::new(wall, WE, 25000)
}

#[test]
fn test_ron_priority() {
    let oracle = Oracle::default();
    // seat1: p5の嵌張待ち, seat3: p5とz2のシャンポン待ち
    let stg = debug_stage(
        ["m123456789s1234", "m123456789p46z11", "", "s123456789p55z22"],
        &[TP + 4],
    );
    let mut ctrl = MatchController::new(stg, fixed_actors([false; SEAT], None));
    ctrl.start(&oracle).unwrap();
    ctrl.advance_scripted_seat(&oracle).unwrap();

    let stg = ctrl.stage();
    assert!(stg.is_over);
    assert_eq!(stg.winner, Some(1));
    assert_eq!(stg.players[1].hand.len(), 14);
    assert!(stg.players[0].discards.is_empty());
    assert!(stg.check_conservation());
    assert_eq!(ctrl.advance_scripted_seat(&oracle), Err(Error::GameOver));
}

#[test]
fn test_scripted_call() {
    let oracle = Oracle::default();
    let hands = ["m123456789s1234", "m1357p55s2468z123", "", ""];

    // 必ず鳴く
    let mut ctrl = MatchController::new(debug_stage(hands, &[TP + 4]), fixed_actors([false, true, false, false], None));
    ctrl.advance_scripted_seat(&oracle).unwrap();
    let stg = ctrl.stage();
    assert_eq!(stg.players[1].melds, vec![Meld::new(MeldType::Pon, TP + 4, 0)]);
    assert_eq!(stg.turn, 1);
    assert!(stg.check_conservation());

    // ポンの後はツモらずに打牌
    let wall = stg.wall.len();
    ctrl.advance_scripted_seat(&oracle).unwrap();
    let stg = ctrl.stage();
    assert_eq!(stg.wall.len(), wall);
    assert_eq!(stg.players[1].hand.len(), 10);
    assert_eq!(stg.players[1].discards.len(), 1);
    assert!(stg.check_conservation());

    // 鳴かない
    let mut ctrl = MatchController::new(debug_stage(hands, &[TP + 4]), fixed_actors([false; SEAT], None));
    ctrl.advance_scripted_seat(&oracle).unwrap();
    let stg = ctrl.stage();
    assert!(stg.players[1].melds.is_empty());
    assert_eq!(stg.players[0].discards.len(), 1);
    assert_eq!(stg.turn, 1);
    assert!(stg.players[1].needs_draw());
}

#[test]
fn test_scripted_kan() {
    let oracle = Oracle::default();
    let hands = ["m123456789s1234", "m1357p555s246z123", "", ""];
    let mut ctrl = MatchController::new(debug_stage(hands, &[TP + 4]), fixed_actors([true; SEAT], None));
    ctrl.advance_scripted_seat(&oracle).unwrap();
    let stg = ctrl.stage();
    assert_eq!(stg.players[1].melds[0].meld_type, MeldType::Minkan);
    assert_eq!(stg.visibles.get(TP + 4), 4);
    assert_eq!(stg.players[1].hand.len(), 10);

    // 明槓の後は嶺上牌の代わりに1枚ツモってから打牌
    let wall = stg.wall.len();
    ctrl.advance_scripted_seat(&oracle).unwrap();
    let stg = ctrl.stage();
    assert!(stg.is_over || stg.wall.len() == wall - 1);
    assert_eq!(stg.players[1].hand.len(), 10);
    assert!(stg.check_conservation());
}

#[test]
fn test_human_call_offer() {
    let oracle = Oracle::default();
    let hands = ["m123456789s1234", "m1357p55s2468z123", "", ""];

    let mut ctrl = MatchController::new(debug_stage(hands, &[TP + 4]), fixed_actors([false; SEAT], Some(1)));
    ctrl.start(&oracle).unwrap();
    assert_eq!(ctrl.human_seat(), Some(1));
    assert_eq!(ctrl.accept_meld(&oracle, TP + 4, MeldType::Pon, 0), Err(Error::NoPendingCall));
    ctrl.advance_scripted_seat(&oracle).unwrap();

    let offer = ctrl.pending_call().unwrap().clone();
    assert_eq!(
        offer,
        CallOffer {
            seat: 1,
            kind: TP + 4,
            discarder: 0,
            meld_types: vec![MeldType::Pon],
        }
    );
    // 選択待ちの間は進行しない
    assert_eq!(ctrl.advance_scripted_seat(&oracle), Err(Error::PendingCall));
    assert_eq!(ctrl.human_discard(&oracle, TM), Err(Error::PendingCall));
    assert_eq!(
        ctrl.accept_meld(&oracle, TP + 4, MeldType::Minkan, 0),
        Err(Error::IllegalCall {
            seat: 1,
            kind: TP + 4,
            meld_type: MeldType::Minkan
        })
    );

    let mut accepted = MatchController::new(debug_stage(hands, &[TP + 4]), fixed_actors([false; SEAT], Some(1)));
    accepted.advance_scripted_seat(&oracle).unwrap();
    accepted.accept_meld(&oracle, TP + 4, MeldType::Pon, 0).unwrap();
    let stg = accepted.stage();
    assert!(accepted.pending_call().is_none());
    assert_eq!(stg.turn, 1);
    assert_eq!(stg.players[1].hand.len(), 11); // ツモなし
    accepted.human_discard(&oracle, TM).unwrap();
    assert_eq!(accepted.stage().turn, 2);
    assert!(accepted.stage().check_conservation());

    // 見送った場合は自動でツモ
    ctrl.decline_meld(&oracle).unwrap();
    let stg = ctrl.stage();
    assert!(ctrl.pending_call().is_none());
    assert_eq!(stg.turn, 1);
    assert!(stg.players[1].melds.is_empty());
    assert_eq!(stg.players[1].hand.len(), 14);
    assert_eq!(ctrl.decline_meld(&oracle), Err(Error::NoPendingCall));
    assert_eq!(ctrl.advance_scripted_seat(&oracle), Err(Error::HumanTurn));
    ctrl.human_discard(&oracle, TM).unwrap();
    assert_eq!(ctrl.stage().turn, 2);
}

#[test]
fn test_human_errors() {
    let oracle = Oracle::default();
    let mut ctrl = MatchController::new(Stage::new(super::create_wall(4), WE, 25000), fixed_actors([false; SEAT], Some(2)));
    ctrl.start(&oracle).unwrap();
    let k = ctrl.stage().players[2].hand[0].kind();
    assert_eq!(ctrl.human_discard(&oracle, k), Err(Error::NotYourTurn { seat: 2, turn: 0 }));
    assert_eq!(ctrl.human_discard(&oracle, KIND), Err(Error::InvalidKind(KIND)));
    assert_eq!(ctrl.decline_meld(&oracle), Err(Error::NoPendingCall));
}

#[test]
fn test_full_scripted_match() {
    use crate::actor::create_actors;

    let oracle = Oracle::default();
    for seed in 1..=5 {
        let stg = Stage::new(super::create_wall(seed), WE, 25000);
        let mut ctrl = MatchController::new(stg, create_actors(seed, 0.3, None));
        ctrl.start(&oracle).unwrap();
        let mut n_step = 0;
        while !ctrl.is_over() {
            ctrl.advance_scripted_seat(&oracle).unwrap();
            assert!(ctrl.stage().check_conservation());
            n_step += 1;
            assert!(n_step <= TILE_TOTAL);
        }
        let stg = ctrl.stage();
        assert!(stg.winner.is_some() || stg.wall.is_empty());
        assert_eq!(ctrl.advance_scripted_seat(&oracle), Err(Error::GameOver));
    }
}

#[test]
fn test_full_match_with_human() {
    use crate::actor::create_actors;

    let oracle = Oracle::default();
    for seed in 1..=3 {
        let stg = Stage::new(super::create_wall(seed), WE, 25000);
        let mut ctrl = MatchController::new(stg, create_actors(seed, 0.5, Some(0)));
        ctrl.start(&oracle).unwrap();
        let mut n_step = 0;
        while !ctrl.is_over() {
            if ctrl.pending_call().is_some() {
                ctrl.decline_meld(&oracle).unwrap();
            } else if ctrl.stage().turn == 0 {
                let k = ctrl.stage().players[0].hand.last().unwrap().kind();
                ctrl.human_discard(&oracle, k).unwrap();
            } else {
                ctrl.advance_until_human(&oracle).unwrap();
            }
            assert!(ctrl.stage().check_conservation());
            n_step += 1;
            assert!(n_step <= TILE_TOTAL);
        }
    }
}
