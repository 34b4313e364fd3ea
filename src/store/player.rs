//! Player store interface
//!
//! This module defines the persistence seam for player aggregates: versioned
//! reads for optimistic concurrency, ordered scans for leaderboard rebuilds,
//! and the atomic match commit that applies both participants' updates and
//! the audit record as one unit.

use crate::types::{
    Discipline, DisciplineStats, LeaderboardCriterion, MatchId, PlayerId, PlayerRecord,
    RatingAuditRecord,
};
use async_trait::async_trait;

/// A player record together with its storage version
#[derive(Debug, Clone)]
pub struct VersionedPlayer {
    pub player: PlayerRecord,
    /// Incremented by the store on every committed write
    pub version: u64,
}

/// One player's pending write within a match commit
#[derive(Debug, Clone)]
pub struct PlayerWrite {
    pub player: PlayerRecord,
    /// Version observed when the record was read; the commit fails with
    /// `ConcurrencyConflict` if the stored version has moved on
    pub expected_version: u64,
}

/// The full unit of work for one completed match
///
/// Either everything in the commit is applied, or nothing is.
#[derive(Debug, Clone)]
pub struct MatchCommit {
    pub match_id: MatchId,
    /// Exactly the two participants
    pub players: [PlayerWrite; 2],
    /// Replacement per-discipline rows, when the match tracks a discipline
    pub discipline_stats: Vec<DisciplineStats>,
    /// Audit record; its match_id doubles as the idempotency key
    pub audit: RatingAuditRecord,
}

/// Result of applying a match commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCommitOutcome {
    /// The commit was applied
    Applied,
    /// An audit record for this match already existed; nothing was written
    AlreadyProcessed,
}

/// Trait for player persistence operations
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Get a player's record with its current version
    async fn get_player(&self, player_id: &PlayerId)
        -> crate::error::Result<Option<VersionedPlayer>>;

    /// Create a new player together with their per-discipline rows
    async fn create_player(
        &self,
        player: PlayerRecord,
        discipline_stats: Vec<DisciplineStats>,
    ) -> crate::error::Result<()>;

    /// List players with at least `min_matches` played, ordered descending by
    /// the criterion value (ties broken by player id ascending), capped at
    /// `limit`
    async fn list_players(
        &self,
        min_matches: u32,
        criterion: LeaderboardCriterion,
        limit: usize,
    ) -> crate::error::Result<Vec<PlayerRecord>>;

    /// Get one per-discipline statistics row
    async fn get_discipline_stats(
        &self,
        player_id: &PlayerId,
        discipline: Discipline,
    ) -> crate::error::Result<Option<DisciplineStats>>;

    /// Atomically apply a match commit
    ///
    /// Contract: all writes land or none do. Fails with
    /// `ConcurrencyConflict` when either expected version is stale. A commit
    /// whose match_id has already been recorded is a successful no-op, so
    /// at-least-once delivery cannot double-apply a match.
    async fn apply_match(&self, commit: MatchCommit)
        -> crate::error::Result<MatchCommitOutcome>;

    /// Total number of stored players
    async fn player_count(&self) -> crate::error::Result<usize>;
}
