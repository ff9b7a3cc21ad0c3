//! Statistics calculation engine.
//!
//! Pure functions over data already fetched from the stores:
//! - Season classification of game versions
//! - Per-character totals, win rates and season ranks
//! - Ranked matchup tallies and battle history

mod characters;
mod matchups;
mod season;

pub use characters::aggregate_character_stats;
pub use matchups::{player_side, process_battles, BattleReport, MatchupCounters};
pub use season::{is_current_season, Season, SEASON2_MIN_VERSION};

/// Calculate win rate as a percentage rounded to two decimals.
/// Zero games played gives 0.
pub fn calculate_win_rate(wins: u32, losses: u32) -> f64 {
    let total = wins as u64 + losses as u64;
    if total == 0 {
        0.0
    } else {
        round2(wins as f64 / total as f64 * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
