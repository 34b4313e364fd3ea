//! Leaderboard rebuild configuration

use crate::types::LeaderboardCriterion;
use serde::{Deserialize, Serialize};

/// Configuration for leaderboard snapshot rebuilds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Minimum matches required to appear on the rating leaderboard
    pub min_matches_rating: u32,
    /// Minimum matches required to appear on the win-rate leaderboard
    pub min_matches_win_rate: u32,
    /// Minimum matches required to appear on the total-wins leaderboard
    pub min_matches_wins: u32,
    /// Maximum entries per snapshot
    pub max_entries: usize,
    /// Interval between scheduled rebuilds in seconds
    pub rebuild_interval_seconds: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            min_matches_rating: 5,
            min_matches_win_rate: 10,
            min_matches_wins: 1,
            max_entries: 100,
            rebuild_interval_seconds: 86_400, // daily
        }
    }
}

impl LeaderboardConfig {
    /// Minimum-match threshold for a criterion
    pub fn min_matches_for(&self, criterion: LeaderboardCriterion) -> u32 {
        match criterion {
            LeaderboardCriterion::Rating => self.min_matches_rating,
            LeaderboardCriterion::WinRate => self.min_matches_win_rate,
            LeaderboardCriterion::Wins => self.min_matches_wins,
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.max_entries == 0 {
            return Err(crate::error::RatingEngineError::ConfigurationError {
                message: "Leaderboard max_entries must be positive".to_string(),
            }
            .into());
        }

        if self.rebuild_interval_seconds == 0 {
            return Err(crate::error::RatingEngineError::ConfigurationError {
                message: "Leaderboard rebuild interval must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = LeaderboardConfig::default();
        assert_eq!(config.min_matches_for(LeaderboardCriterion::Rating), 5);
        assert_eq!(config.min_matches_for(LeaderboardCriterion::WinRate), 10);
        assert_eq!(config.min_matches_for(LeaderboardCriterion::Wins), 1);
        assert_eq!(config.max_entries, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let config = LeaderboardConfig {
            max_entries: 0,
            ..LeaderboardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
