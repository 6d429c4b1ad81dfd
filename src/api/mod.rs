// 外部向けのインターフェイス (要求, 応答とSession)
mod evaluate;
mod session;
mod snapshot;

pub use self::{
    evaluate::{evaluate, EvaluateRequest, EvaluateResponse, RankedDiscard},
    session::{Request, Response, Session},
    snapshot::{MatchSnapshot, SeatSnapshot},
};

#[cfg(test)]
use crate::control::MatchConfig;
#[cfg(test)]
use crate::model::*;

#[cfg(test)]
fn session_for_test(seed: u64, human_seat: Option<Seat>) -> Session {
    let config = MatchConfig {
        seed,
        human_seat,
        ..Default::default()
    };
    Session::new(config).unwrap()
}

#[test]
fn test_session_no_match() {
    let mut ss = session_for_test(1, Some(0));
    assert_eq!(ss.get_match_state(), Err(Error::NoMatch));
    assert_eq!(ss.human_discard(0), Err(Error::NoMatch));
    assert_eq!(ss.advance_scripted_seat(), Err(Error::NoMatch));
    assert_eq!(ss.decline_meld(), Err(Error::NoMatch));

    let res = ss.evaluate(&EvaluateRequest::new(vec![0, 1, 2, 9, 9])).unwrap();
    assert_eq!(res.shanten, -1);
    assert_eq!(ss.config().seed, 1);

    // seed = 0 は時刻から決める
    let ss = session_for_test(0, Some(0));
    assert_ne!(ss.config().seed, 0);
}

#[test]
fn test_session_start_match() {
    let mut ss = session_for_test(1, Some(0));
    let snap = ss.start_match().unwrap();
    assert_eq!(snap.current_turn, 0);
    assert_eq!(snap.wall_remaining, TILE_TOTAL - 13 * SEAT - 2);
    assert_eq!(snap.dora_indicator_kinds.len(), 1);
    assert!(!snap.is_game_over);
    assert_eq!(snap.winner_seat, None);
    assert_eq!(snap.seats.len(), SEAT);
    assert_eq!(snap.seats[0].hand_count, 14);
    assert_eq!(snap.seats[0].hand.as_ref().map(|h| h.len()), Some(14));
    for s in 1..SEAT {
        assert_eq!(snap.seats[s].hand_count, 13);
        assert!(snap.seats[s].hand.is_none()); // 他家の手牌は見えない
    }
    assert_eq!(ss.get_match_state().unwrap(), snap);
    assert_eq!(ss.advance_scripted_seat(), Err(Error::HumanTurn));

    // 同じシードのSessionは同じ対局を再現する
    let mut ss2 = session_for_test(1, Some(0));
    assert_eq!(ss2.start_match().unwrap(), snap);
}

#[test]
fn test_session_play() {
    for seed in 1..=3 {
        let mut ss = session_for_test(seed, Some(0));
        let mut snap = ss.start_match().unwrap();
        let mut n_step = 0;
        while !snap.is_game_over {
            snap = if let Some(offer) = &snap.pending_call {
                if n_step % 2 == 0 {
                    ss.accept_meld(offer.kind, offer.meld_types[0], offer.discarder).unwrap()
                } else {
                    ss.decline_meld().unwrap()
                }
            } else if snap.current_turn == 0 {
                // 人間の手番は常にツモ済み
                let hand = snap.seats[0].hand.clone().unwrap();
                assert_eq!(hand.len() % 3, 2);
                let k = *hand.last().unwrap();
                ss.human_discard(k).unwrap()
            } else {
                ss.advance_scripted_seat().unwrap()
            };
            n_step += 1;
            assert!(n_step <= 2 * TILE_TOTAL);
        }

        // 終局後は全員の手牌を公開し, 操作を受け付けない
        assert!(snap.seats.iter().all(|s| s.hand.is_some()));
        assert!(snap.winner_seat.is_some() || snap.wall_remaining == 0);
        assert_eq!(ss.advance_scripted_seat(), Err(Error::GameOver));
        assert_eq!(ss.human_discard(0), Err(Error::GameOver));
    }
}

#[test]
fn test_session_handle_json() {
    let mut ss = session_for_test(3, Some(0));

    let req: Request = serde_json::from_str(r#"{"op": "get_match_state"}"#).unwrap();
    let res = serde_json::to_string(&ss.handle(req)).unwrap();
    assert_eq!(res, r#"{"error":"no match"}"#);

    let req: Request = serde_json::from_str(r#"{"op": "start_match"}"#).unwrap();
    match ss.handle(req) {
        Response::Match(snap) => assert_eq!(snap.current_turn, 0),
        res => panic!("unexpected response: {:?}", res),
    }

    let req: Request = serde_json::from_str(r#"{"op": "human_discard", "kind": 34}"#).unwrap();
    assert_eq!(ss.handle(req), Response::Error("invalid tile kind: 34".to_string()));

    let req: Request = serde_json::from_str(r#"{"op": "evaluate", "hand": [0, 1, 2, 9, 9]}"#).unwrap();
    let res = serde_json::to_string(&ss.handle(req)).unwrap();
    assert_eq!(res, r#"{"evaluate":{"shanten":-1,"ranked":[]}}"#);

    let req: Request =
        serde_json::from_str(r#"{"op": "accept_meld", "kind": 5, "type": "kan", "discarder": 1}"#).unwrap();
    assert_eq!(
        req,
        Request::AcceptMeld {
            kind: 5,
            meld_type: MeldType::Minkan,
            discarder: 1
        }
    );
    assert_eq!(ss.handle(req), Response::Error("no pending call".to_string()));
}
