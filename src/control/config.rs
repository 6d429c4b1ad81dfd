use serde::Deserialize;

use crate::model::*;

// 対局の設定
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub seed: u64,                // 0: 時刻から生成
    pub human_seat: Option<Seat>, // None: 全席AI
    pub call_probability: f64,    // AIが鳴ける時に鳴く確率
    pub round_wind: Kind,
    pub initial_score: Score,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            human_seat: Some(0),
            call_probability: 0.3,
            round_wind: WE,
            initial_score: 25000,
        }
    }
}

impl MatchConfig {
    pub fn check(&self) -> Result<(), Error> {
        if let Some(s) = self.human_seat {
            if s >= SEAT {
                return Err(Error::InvalidSeat(s));
            }
        }
        if !is_wind(self.round_wind) {
            return Err(Error::InvalidKind(self.round_wind));
        }
        Ok(())
    }
}

#[test]
fn test_match_config() {
    let c: MatchConfig = serde_json::from_str(r#"{"seed": 5, "human_seat": null}"#).unwrap();
    assert_eq!(c.seed, 5);
    assert_eq!(c.human_seat, None);
    assert_eq!(c.call_probability, 0.3);
    assert!(c.check().is_ok());

    let c: MatchConfig = serde_json::from_str(r#"{"human_seat": 4}"#).unwrap();
    assert_eq!(c.check(), Err(Error::InvalidSeat(4)));
    assert_eq!(MatchConfig::default().human_seat, Some(0));
}
