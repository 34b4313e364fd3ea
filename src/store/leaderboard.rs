//! Leaderboard store interface
//!
//! Snapshots are replaced wholesale, identified by
//! (criterion, scope, time period). There is no partial update.

use crate::types::{LeaderboardSnapshot, SnapshotKey};
use async_trait::async_trait;

/// Trait for leaderboard snapshot persistence
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Replace the snapshot stored under `key` in full
    async fn replace_snapshot(
        &self,
        key: SnapshotKey,
        snapshot: LeaderboardSnapshot,
    ) -> crate::error::Result<()>;

    /// Get the current snapshot for a key
    async fn get_snapshot(
        &self,
        key: &SnapshotKey,
    ) -> crate::error::Result<Option<LeaderboardSnapshot>>;
}
