//! Elo rating configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Elo rating calculator
///
/// The defaults reproduce the club's production tuning: K-factor 32,
/// new players start at 1200, and no rating ever drops below 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloConfig {
    /// K-factor controlling how far a single match moves a rating
    pub k_factor: f64,
    /// Rating assigned to players with no prior history
    pub initial_rating: i32,
    /// Hard lower bound applied after every update; there is no ceiling
    pub rating_floor: i32,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1200,
            rating_floor: 100,
        }
    }
}

impl EloConfig {
    /// Create conservative configuration (slower rating changes)
    pub fn conservative() -> Self {
        Self {
            k_factor: 16.0,
            ..Self::default()
        }
    }

    /// Create aggressive configuration (faster rating changes)
    pub fn aggressive() -> Self {
        Self {
            k_factor: 48.0,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.k_factor <= 0.0 {
            return Err(crate::error::RatingEngineError::ConfigurationError {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.rating_floor < 0 {
            return Err(crate::error::RatingEngineError::ConfigurationError {
                message: "Rating floor must be non-negative".to_string(),
            }
            .into());
        }

        if self.initial_rating < self.rating_floor {
            return Err(crate::error::RatingEngineError::ConfigurationError {
                message: "Initial rating must not be below the rating floor".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
