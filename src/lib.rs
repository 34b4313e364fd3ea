//! Cue Score - Rating and statistics engine for billiards-club match play
//!
//! This crate provides Elo rating computation, per-player aggregate and
//! per-discipline statistics maintenance, idempotent match-result processing
//! with an auditable rating trail, and wholesale leaderboard snapshot
//! rebuilds. Persistence is abstracted behind store traits.

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod processor;
pub mod rating;
pub mod stats;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingEngineError, Result};
pub use types::*;

// Re-export key components
pub use leaderboard::{LeaderboardBuilder, RebuildSummary};
pub use processor::{MatchResultProcessor, ProcessOutcome};
pub use rating::{EloRatingCalculator, RatingCalculator};
pub use stats::AggregateUpdater;
pub use store::{AuditSink, InMemoryStore, LeaderboardStore, PlayerStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
