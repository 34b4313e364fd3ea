//! Persistence seams for the rating engine
//!
//! This module defines the storage interfaces the engine depends on and an
//! in-memory reference implementation used by tests and the simulator.

pub mod audit;
pub mod leaderboard;
pub mod memory;
pub mod player;

// Re-export commonly used types
pub use audit::AuditSink;
pub use leaderboard::LeaderboardStore;
pub use memory::InMemoryStore;
pub use player::{MatchCommit, MatchCommitOutcome, PlayerStore, PlayerWrite, VersionedPlayer};
