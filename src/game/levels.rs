//! Score-driven progression & game speed
use crate::consts;
use std::time::Duration;

/// The level reached with the given score.  Levels start at 1.
pub(crate) fn level_for_score(score: u32) -> u32 {
    score / consts::POINTS_PER_LEVEL + 1
}

/// Points still needed to reach the next level
pub(crate) fn points_to_next_level(score: u32) -> u32 {
    consts::POINTS_PER_LEVEL - score % consts::POINTS_PER_LEVEL
}

/// Simulation ticks per second at the given level
pub(crate) fn ticks_per_second(level: u32) -> f64 {
    let exp = i32::try_from(level.saturating_sub(1)).unwrap_or(i32::MAX);
    (consts::BASE_TPS * consts::LEVEL_SPEEDUP.powi(exp)).min(consts::MAX_TPS)
}

/// Time between ticks at the given level
pub(crate) fn tick_period(level: u32) -> Duration {
    Duration::from_secs_f64(ticks_per_second(level).recip())
}

/// How much faster than level 1 the game runs at the given level
pub(crate) fn speed_multiplier(level: u32) -> f64 {
    ticks_per_second(level) / consts::BASE_TPS
}
