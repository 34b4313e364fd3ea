//! Elo rating calculator
//!
//! This module provides the production implementation of the rating
//! calculator using the classic Elo model: fixed K-factor, expected scores
//! from the 400-point logistic curve, and a hard rating floor.

use crate::config::EloConfig;
use crate::rating::calculator::RatingCalculator;
use crate::types::{MatchScore, PlayerId, RatingDelta};
use skillratings::elo::{expected_score, EloRating};

/// Elo rating calculator implementation
///
/// Ratings are kept as integers. A change is `round(K * (score - expected))`,
/// rounded half away from zero, and the updated rating is clamped to the
/// configured floor. `RatingDelta::change` carries the unclamped change, so
/// `after` can differ from `before + change` when the floor engages.
#[derive(Debug)]
pub struct EloRatingCalculator {
    config: EloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo calculator with validated configuration
    pub fn new(config: EloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Expected score for the first rating against the second:
    /// `1 / (1 + 10^((rating_b - rating_a) / 400))`
    pub fn expected(&self, rating_a: i32, rating_b: i32) -> f64 {
        let (expected_a, _expected_b) = expected_score(
            &EloRating {
                rating: f64::from(rating_a),
            },
            &EloRating {
                rating: f64::from(rating_b),
            },
        );

        expected_a
    }

    fn delta_for(&self, player_id: &PlayerId, rating: i32, score: f64, expected: f64) -> RatingDelta {
        let change = (self.config.k_factor * (score - expected)).round() as i32;
        let after = (rating + change).max(self.config.rating_floor);

        RatingDelta {
            player_id: player_id.clone(),
            before: rating,
            after,
            change,
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate(
        &self,
        player_a: (&PlayerId, i32),
        player_b: (&PlayerId, i32),
        score: MatchScore,
    ) -> crate::error::Result<[RatingDelta; 2]> {
        let (a_id, rating_a) = player_a;
        let (b_id, rating_b) = player_b;

        if a_id == b_id {
            return Err(crate::error::RatingEngineError::InvalidMatchState {
                reason: format!("Both rating inputs refer to player {}", a_id),
            }
            .into());
        }

        let expected_a = self.expected(rating_a, rating_b);
        let expected_b = 1.0 - expected_a;

        Ok([
            self.delta_for(a_id, rating_a, score.score_a(), expected_a),
            self.delta_for(b_id, rating_b, score.score_b(), expected_b),
        ])
    }

    fn initial_rating(&self) -> i32 {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.config.k_factor,
            "initial_rating": self.config.initial_rating,
            "rating_floor": self.config.rating_floor,
        })
    }
}
