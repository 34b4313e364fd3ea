//! Rating calculator trait and test implementations
//!
//! This module defines the interface for rating calculations. The production
//! implementation lives in [`crate::rating::elo`].

use crate::types::{MatchScore, PlayerId, RatingDelta};

/// Trait for calculating rating changes after a two-player match
pub trait RatingCalculator: Send + Sync {
    /// Calculate rating deltas for both participants of a decided match
    ///
    /// # Arguments
    /// * `player_a` / `player_b` - (player id, current rating) pairs
    /// * `score` - outcome from player A's perspective
    ///
    /// # Returns
    /// Deltas in `[player_a, player_b]` order. Pure and deterministic.
    fn calculate(
        &self,
        player_a: (&PlayerId, i32),
        player_b: (&PlayerId, i32),
        score: MatchScore,
    ) -> crate::error::Result<[RatingDelta; 2]>;

    /// Get the initial rating for players with no history
    fn initial_rating(&self) -> i32;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Mock rating calculator for testing
#[derive(Debug)]
pub struct MockRatingCalculator {
    calls: std::sync::Mutex<Vec<(PlayerId, i32, PlayerId, i32, MatchScore)>>,
    fixed_result: std::sync::RwLock<Option<[RatingDelta; 2]>>,
    initial_rating: i32,
}

impl Default for MockRatingCalculator {
    fn default() -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
            fixed_result: std::sync::RwLock::new(None),
            initial_rating: 1200,
        }
    }
}

impl MockRatingCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed result to return for all calculations
    pub fn set_fixed_result(&self, result: [RatingDelta; 2]) {
        if let Ok(mut fixed) = self.fixed_result.write() {
            *fixed = Some(result);
        }
    }

    /// Get all calculation calls made (for testing)
    pub fn get_calls(&self) -> Vec<(PlayerId, i32, PlayerId, i32, MatchScore)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

impl RatingCalculator for MockRatingCalculator {
    fn calculate(
        &self,
        player_a: (&PlayerId, i32),
        player_b: (&PlayerId, i32),
        score: MatchScore,
    ) -> crate::error::Result<[RatingDelta; 2]> {
        // Record the call
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((
                player_a.0.clone(),
                player_a.1,
                player_b.0.clone(),
                player_b.1,
                score,
            ));
        }

        // Return fixed result if set, otherwise no change
        if let Ok(fixed) = self.fixed_result.read() {
            if let Some(result) = fixed.as_ref() {
                return Ok(result.clone());
            }
        }

        Ok([
            RatingDelta {
                player_id: player_a.0.clone(),
                before: player_a.1,
                after: player_a.1,
                change: 0,
            },
            RatingDelta {
                player_id: player_b.0.clone(),
                before: player_b.1,
                after: player_b.1,
                change: 0,
            },
        ])
    }

    fn initial_rating(&self) -> i32 {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "mock",
            "initial_rating": self.initial_rating,
        })
    }
}
