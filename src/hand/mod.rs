// 手牌の向聴数や点数計算を行うモジュール
mod dora;
mod point;
mod shanten;
mod value;

pub use self::{
    dora::{count_dora, create_dora_table, dora_kinds},
    point::{calc_base_point, calc_points, calc_score, get_score_title, Points},
    shanten::{
        calc_chiitoitsu_shanten, calc_kokushimusou_shanten, calc_normal_shanten, calc_shanten,
        ShantenOracle, StandardShanten,
    },
    value::{SimpleValue, Valuation, ValueFailure, ValueOracle, WinContext, Yaku, NO_YAKU_SCORE},
};

// 向聴数と点数計算のオラクルの組
// 差し替え可能にするためtrait objectで保持する
pub struct Oracle {
    pub shanten: Box<dyn ShantenOracle>,
    pub value: Box<dyn ValueOracle>,
}

impl Oracle {
    pub fn new(shanten: Box<dyn ShantenOracle>, value: Box<dyn ValueOracle>) -> Self {
        Self { shanten, value }
    }
}

impl Default for Oracle {
    fn default() -> Self {
        Self::new(Box::new(StandardShanten), Box::new(SimpleValue))
    }
}

impl std::fmt::Debug for Oracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Oracle")
    }
}
