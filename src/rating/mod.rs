//! Rating computation using the Elo model
//!
//! This module provides the rating calculator seam and the Elo
//! implementation backed by the skillratings crate's expected-score curve.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::EloRatingCalculator;
