use log::info;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::evaluate::{evaluate, EvaluateRequest, EvaluateResponse};
use super::snapshot::MatchSnapshot;
use crate::actor::create_actors;
use crate::control::{create_wall, MatchConfig, MatchController, Stage};
use crate::hand::Oracle;
use crate::model::*;
use crate::util::misc::unixtime_now;

// JSON-lines形式の要求 ({"op": "human_discard", "kind": 5} など)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Evaluate(EvaluateRequest),
    StartMatch,
    GetMatchState,
    HumanDiscard {
        kind: Kind,
    },
    AdvanceScriptedSeat,
    AcceptMeld {
        kind: Kind,
        #[serde(rename = "type")]
        meld_type: MeldType,
        discarder: Seat,
    },
    DeclineMeld,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Evaluate(EvaluateResponse),
    Match(MatchSnapshot),
    Error(String),
}

// [Session]
// 1つのプロセスで扱う対局(同時に1つ)と評価のための状態を保持する
// 並行に利用する場合は呼び出し側で排他制御を行うこと
#[derive(Debug)]
pub struct Session {
    config: MatchConfig,
    oracle: Oracle,
    rng: StdRng, // 対局ごとのシード生成
    ctrl: Option<MatchController>,
}

impl Session {
    pub fn new(config: MatchConfig) -> Result<Self, Error> {
        Self::with_oracle(config, Oracle::default())
    }

    // seed = 0 の場合は現在時刻からシードを決める
    pub fn with_oracle(mut config: MatchConfig, oracle: Oracle) -> Result<Self, Error> {
        config.check()?;
        if config.seed == 0 {
            config.seed = (unixtime_now() as u64).max(1);
            info!("seed is derived from unixtime: {}", config.seed);
        }
        Ok(Self {
            rng: SeedableRng::seed_from_u64(config.seed),
            config,
            oracle,
            ctrl: None,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn evaluate(&self, req: &EvaluateRequest) -> Result<EvaluateResponse, Error> {
        evaluate(&self.oracle, req)
    }

    // 新しい対局を開始 (進行中の対局は破棄)
    pub fn start_match(&mut self) -> Result<MatchSnapshot, Error> {
        let seed = self.rng.next_u64();
        let conf = &self.config;
        info!("start match: seed {}, human seat {:?}", seed, conf.human_seat);
        let stg = Stage::new(create_wall(seed), conf.round_wind, conf.initial_score);
        let actors = create_actors(seed, conf.call_probability, conf.human_seat);
        let ctrl = self.ctrl.insert(MatchController::new(stg, actors));
        ctrl.start(&self.oracle)?;
        Ok(MatchSnapshot::new(ctrl))
    }

    pub fn get_match_state(&self) -> Result<MatchSnapshot, Error> {
        let ctrl = self.ctrl.as_ref().ok_or(Error::NoMatch)?;
        Ok(MatchSnapshot::new(ctrl))
    }

    pub fn human_discard(&mut self, kind: Kind) -> Result<MatchSnapshot, Error> {
        let ctrl = self.ctrl.as_mut().ok_or(Error::NoMatch)?;
        ctrl.human_discard(&self.oracle, kind)?;
        Ok(MatchSnapshot::new(ctrl))
    }

    pub fn advance_scripted_seat(&mut self) -> Result<MatchSnapshot, Error> {
        let ctrl = self.ctrl.as_mut().ok_or(Error::NoMatch)?;
        ctrl.advance_scripted_seat(&self.oracle)?;
        Ok(MatchSnapshot::new(ctrl))
    }

    pub fn accept_meld(&mut self, kind: Kind, meld_type: MeldType, discarder: Seat) -> Result<MatchSnapshot, Error> {
        let ctrl = self.ctrl.as_mut().ok_or(Error::NoMatch)?;
        ctrl.accept_meld(&self.oracle, kind, meld_type, discarder)?;
        Ok(MatchSnapshot::new(ctrl))
    }

    pub fn decline_meld(&mut self) -> Result<MatchSnapshot, Error> {
        let ctrl = self.ctrl.as_mut().ok_or(Error::NoMatch)?;
        ctrl.decline_meld(&self.oracle)?;
        Ok(MatchSnapshot::new(ctrl))
    }

    pub fn handle(&mut self, req: Request) -> Response {
        let res = match req {
            Request::Evaluate(r) => self.evaluate(&r).map(Response::Evaluate),
            Request::StartMatch => self.start_match().map(Response::Match),
            Request::GetMatchState => self.get_match_state().map(Response::Match),
            Request::HumanDiscard { kind } => self.human_discard(kind).map(Response::Match),
            Request::AdvanceScriptedSeat => self.advance_scripted_seat().map(Response::Match),
            Request::AcceptMeld {
                kind,
                meld_type,
                discarder,
            } => self.accept_meld(kind, meld_type, discarder).map(Response::Match),
            Request::DeclineMeld => self.decline_meld().map(Response::Match),
        };
        res.unwrap_or_else(|e| Response::Error(e.to_string()))
    }
}
