//! Leaderboard snapshot rebuilds
//!
//! This module recomputes named rankings from the full player population and
//! replaces the stored snapshots wholesale. Rebuilds run on demand or on a
//! fixed schedule; each criterion rebuilds independently so one failure
//! cannot block the others.

use crate::config::LeaderboardConfig;
use crate::store::leaderboard::LeaderboardStore;
use crate::store::player::PlayerStore;
use crate::types::{
    LeaderboardCriterion, LeaderboardSnapshot, RankingEntry, SnapshotKey,
};
use std::sync::Arc;
use tokio::time::interval;
use tracing::{error, info};

/// Result of a full rebuild pass over all criteria
#[derive(Debug, Clone, Default)]
pub struct RebuildSummary {
    pub succeeded: Vec<LeaderboardCriterion>,
    pub failed: Vec<(LeaderboardCriterion, String)>,
}

impl RebuildSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rebuilds leaderboard snapshots from the player population
pub struct LeaderboardBuilder {
    players: Arc<dyn PlayerStore>,
    snapshots: Arc<dyn LeaderboardStore>,
    config: LeaderboardConfig,
}

impl LeaderboardBuilder {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        snapshots: Arc<dyn LeaderboardStore>,
        config: LeaderboardConfig,
    ) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self {
            players,
            snapshots,
            config,
        })
    }

    /// Rebuild one criterion's global all-time snapshot and replace it
    ///
    /// The scan is read-mostly and tolerates concurrent match processing;
    /// the snapshot reflects player state as of scan time.
    pub async fn rebuild(
        &self,
        criterion: LeaderboardCriterion,
    ) -> crate::error::Result<LeaderboardSnapshot> {
        let min_matches = self.config.min_matches_for(criterion);
        let qualified = self
            .players
            .list_players(min_matches, criterion, self.config.max_entries)
            .await?;

        let rankings: Vec<RankingEntry> = qualified
            .iter()
            .enumerate()
            .map(|(index, player)| RankingEntry {
                rank: index as u32 + 1,
                player_id: player.id.clone(),
                value: criterion.value_for(player),
                change_from_last: 0,
            })
            .collect();

        let snapshot = LeaderboardSnapshot {
            name: criterion.snapshot_name().to_string(),
            criterion,
            scope: "Global".to_string(),
            time_period: "All time".to_string(),
            min_matches_required: min_matches,
            total_players: rankings.len(),
            rankings,
            last_updated: crate::utils::current_timestamp(),
        };

        self.snapshots
            .replace_snapshot(snapshot.key(), snapshot.clone())
            .await?;

        info!(
            criterion = %criterion,
            players = snapshot.total_players,
            "Rebuilt leaderboard snapshot"
        );

        Ok(snapshot)
    }

    /// Rebuild every criterion, isolating failures per criterion
    pub async fn rebuild_all(&self) -> RebuildSummary {
        let mut summary = RebuildSummary::default();

        for criterion in LeaderboardCriterion::ALL {
            match self.rebuild(criterion).await {
                Ok(_) => summary.succeeded.push(criterion),
                Err(e) => {
                    error!(criterion = %criterion, error = %e, "Leaderboard rebuild failed");
                    summary.failed.push((criterion, e.to_string()));
                }
            }
        }

        summary
    }

    /// Spawn the scheduled rebuild loop (daily by default)
    pub fn start_schedule(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let period = std::time::Duration::from_secs(self.config.rebuild_interval_seconds);

        tokio::spawn(async move {
            let mut ticker = interval(period);
            // The first tick fires immediately; skip it so startup does not
            // race an initial data load
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let summary = self.rebuild_all().await;
                if !summary.all_succeeded() {
                    error!(
                        failed = summary.failed.len(),
                        "Scheduled leaderboard rebuild completed with failures"
                    );
                }
            }
        })
    }
}
