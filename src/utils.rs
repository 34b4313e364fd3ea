//! Utility functions for the rating engine

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> String {
    Uuid::new_v4().to_string()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Compute a win rate, defined as 0.0 when no matches have been played
pub fn win_rate(wins: u32, total_matches: u32) -> f64 {
    if total_matches == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total_matches)
    }
}
