// 打牌候補の順位付け (受け入れ枚数, 期待値)
mod candidate;
mod rank;

pub use self::{
    candidate::{calc_utility, cmp_by_efficiency, cmp_by_expected_value, Acceptance, DiscardCandidate},
    rank::{rank_by_efficiency, rank_by_expected_value, RankContext, IMPROVEMENT_WEIGHT},
};
