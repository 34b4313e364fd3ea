//! Match result processing
//!
//! This module provides the MatchResultProcessor that orchestrates rating
//! and aggregate updates exactly once when a match first reaches Completed
//! status, records the audit trail, and retries the whole step on
//! optimistic-concurrency conflicts.

use crate::config::ProcessingSettings;
use crate::error::RatingEngineError;
use crate::rating::calculator::RatingCalculator;
use crate::stats::AggregateUpdater;
use crate::store::audit::AuditSink;
use crate::store::player::{MatchCommit, MatchCommitOutcome, PlayerStore, PlayerWrite};
use crate::types::{
    DisciplineStats, MatchCompleted, MatchRecord, MatchScore, MatchStatus, PlayerId,
    RatingAuditRecord, RatingDelta,
};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Statistics about processor operations
#[derive(Debug, Clone, Default)]
pub struct ProcessorStats {
    /// Matches fully applied
    pub matches_applied: u64,
    /// Duplicate deliveries short-circuited by the idempotency guard
    pub duplicates_skipped: u64,
    /// Updates that observed ratings change (ranked, decisive matches)
    pub rating_updates: u64,
    /// Commits retried after an optimistic write collision
    pub conflicts_retried: u64,
}

/// Outcome of processing one match record
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessOutcome {
    /// The match was applied; deltas are empty for unranked matches and draws
    Applied { deltas: Vec<RatingDelta> },
    /// The match had already been processed; nothing changed
    AlreadyProcessed,
    /// The record did not transition into Completed; nothing to do
    NotACompletion,
}

/// Orchestrates the rating and statistics update for completed matches
pub struct MatchResultProcessor {
    players: Arc<dyn PlayerStore>,
    audit: Arc<dyn AuditSink>,
    calculator: Arc<dyn RatingCalculator>,
    settings: ProcessingSettings,
    stats: Arc<RwLock<ProcessorStats>>,
}

impl MatchResultProcessor {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        audit: Arc<dyn AuditSink>,
        calculator: Arc<dyn RatingCalculator>,
        settings: ProcessingSettings,
    ) -> Self {
        Self {
            players,
            audit,
            calculator,
            settings,
            stats: Arc::new(RwLock::new(ProcessorStats::default())),
        }
    }

    /// Get a snapshot of processor statistics
    pub fn stats(&self) -> crate::error::Result<ProcessorStats> {
        Ok(self
            .stats
            .read()
            .map_err(|_| RatingEngineError::InternalError {
                message: "Failed to acquire stats lock".to_string(),
            })?
            .clone())
    }

    /// Process a match status transition
    ///
    /// Triggers only on the transition into Completed from a non-Completed
    /// prior state; re-saving an already-completed match does nothing.
    pub async fn process_transition(
        &self,
        before: &MatchRecord,
        after: &MatchRecord,
    ) -> crate::error::Result<ProcessOutcome> {
        if before.status == MatchStatus::Completed || after.status != MatchStatus::Completed {
            debug!(
                match_id = %after.match_id,
                before = %before.status,
                after = %after.status,
                "Ignoring non-completion transition"
            );
            return Ok(ProcessOutcome::NotACompletion);
        }

        self.process_completed(after).await
    }

    /// Handle a completion event from the match-lifecycle collaborator
    pub async fn handle_event(
        &self,
        event: MatchCompleted,
    ) -> crate::error::Result<ProcessOutcome> {
        let record: MatchRecord = event.into();
        self.process_completed(&record).await
    }

    /// Process a match known to be in Completed status
    ///
    /// Safe to re-invoke for the same match: the audit record keyed by
    /// match_id guards against double-counting under at-least-once delivery.
    pub async fn process_completed(
        &self,
        match_record: &MatchRecord,
    ) -> crate::error::Result<ProcessOutcome> {
        self.validate(match_record)?;

        let mut attempt = 0;
        loop {
            attempt += 1;

            match self.try_apply(match_record).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) => {
                    let conflict = matches!(
                        e.downcast_ref::<RatingEngineError>(),
                        Some(RatingEngineError::ConcurrencyConflict { .. })
                    );

                    if !conflict || attempt >= self.settings.max_retry_attempts {
                        return Err(e);
                    }

                    warn!(
                        match_id = %match_record.match_id,
                        attempt,
                        "Optimistic write collision, retrying from fresh reads"
                    );
                    if let Ok(mut stats) = self.stats.write() {
                        stats.conflicts_retried += 1;
                    }
                    tokio::time::sleep(std::time::Duration::from_millis(
                        self.settings.retry_delay_ms,
                    ))
                    .await;
                }
            }
        }
    }

    /// One attempt: fresh reads, compute, single atomic commit
    async fn try_apply(
        &self,
        match_record: &MatchRecord,
    ) -> crate::error::Result<ProcessOutcome> {
        // Idempotency guard: an audit record means the match was applied
        if self
            .audit
            .find_rating_change(&match_record.match_id)
            .await?
            .is_some()
        {
            info!(match_id = %match_record.match_id, "Match already processed, skipping");
            if let Ok(mut stats) = self.stats.write() {
                stats.duplicates_skipped += 1;
            }
            return Ok(ProcessOutcome::AlreadyProcessed);
        }

        let player1 = self.load_player(&match_record.player1_id).await?;
        let player2 = self.load_player(&match_record.player2_id).await?;

        // Ratings move only for ranked matches with a decisive winner
        let deltas = if match_record.is_ranked && match_record.winner_id.is_some() {
            let score = if match_record.winner_id.as_deref() == Some(match_record.player1_id.as_str()) {
                MatchScore::PlayerAWin
            } else {
                MatchScore::PlayerBWin
            };

            self.calculator
                .calculate(
                    (&player1.player.id, player1.player.rating),
                    (&player2.player.id, player2.player.rating),
                    score,
                )?
                .to_vec()
        } else {
            Vec::new()
        };

        // Aggregate counters update unconditionally, ranked or not
        let mut record1 = player1.player.clone();
        let mut record2 = player2.player.clone();
        let outcome1 = AggregateUpdater::outcome_for(&record1.id, match_record);
        AggregateUpdater::apply_outcome(&mut record1, outcome1);
        let outcome2 = AggregateUpdater::outcome_for(&record2.id, match_record);
        AggregateUpdater::apply_outcome(&mut record2, outcome2);

        for delta in &deltas {
            if delta.player_id == record1.id {
                record1.rating = delta.after;
            } else if delta.player_id == record2.id {
                record2.rating = delta.after;
            }
        }

        let discipline_stats = self.discipline_updates(match_record).await?;

        let commit = MatchCommit {
            match_id: match_record.match_id.clone(),
            players: [
                PlayerWrite {
                    player: record1,
                    expected_version: player1.version,
                },
                PlayerWrite {
                    player: record2,
                    expected_version: player2.version,
                },
            ],
            discipline_stats,
            audit: RatingAuditRecord {
                match_id: match_record.match_id.clone(),
                deltas: deltas.clone(),
                recorded_at: crate::utils::current_timestamp(),
            },
        };

        match self.players.apply_match(commit).await? {
            MatchCommitOutcome::Applied => {
                info!(
                    match_id = %match_record.match_id,
                    ranked = match_record.is_ranked,
                    rating_changes = deltas.len(),
                    "Match applied"
                );
                if let Ok(mut stats) = self.stats.write() {
                    stats.matches_applied += 1;
                    if !deltas.is_empty() {
                        stats.rating_updates += 1;
                    }
                }
                Ok(ProcessOutcome::Applied { deltas })
            }
            MatchCommitOutcome::AlreadyProcessed => {
                // A concurrent delivery won the race; its result stands
                if let Ok(mut stats) = self.stats.write() {
                    stats.duplicates_skipped += 1;
                }
                Ok(ProcessOutcome::AlreadyProcessed)
            }
        }
    }

    fn validate(&self, match_record: &MatchRecord) -> crate::error::Result<()> {
        if match_record.status != MatchStatus::Completed {
            return Err(RatingEngineError::InvalidMatchState {
                reason: format!(
                    "Match {} is in status {}, not Completed",
                    match_record.match_id, match_record.status
                ),
            }
            .into());
        }

        if match_record.player1_id.is_empty() || match_record.player2_id.is_empty() {
            return Err(RatingEngineError::InvalidMatchState {
                reason: format!("Match {} has a missing player id", match_record.match_id),
            }
            .into());
        }

        if match_record.player1_id == match_record.player2_id {
            return Err(RatingEngineError::InvalidMatchState {
                reason: format!(
                    "Match {} lists the same player twice",
                    match_record.match_id
                ),
            }
            .into());
        }

        if let Some(winner) = &match_record.winner_id {
            if winner != &match_record.player1_id && winner != &match_record.player2_id {
                return Err(RatingEngineError::InvalidMatchState {
                    reason: format!(
                        "Winner {} is not a participant of match {}",
                        winner, match_record.match_id
                    ),
                }
                .into());
            }
        }

        Ok(())
    }

    async fn load_player(
        &self,
        player_id: &PlayerId,
    ) -> crate::error::Result<crate::store::VersionedPlayer> {
        self.players
            .get_player(player_id)
            .await?
            .ok_or_else(|| {
                RatingEngineError::PlayerNotFound {
                    player_id: player_id.clone(),
                }
                .into()
            })
    }

    /// Compute replacement per-discipline rows for both participants
    async fn discipline_updates(
        &self,
        match_record: &MatchRecord,
    ) -> crate::error::Result<Vec<DisciplineStats>> {
        let Some(discipline) = match_record.discipline else {
            return Ok(Vec::new());
        };

        let mut rows = Vec::with_capacity(2);
        for player_id in [&match_record.player1_id, &match_record.player2_id] {
            match self
                .players
                .get_discipline_stats(player_id, discipline)
                .await?
            {
                Some(mut stats) => {
                    AggregateUpdater::apply_discipline_outcome(
                        &mut stats,
                        AggregateUpdater::outcome_for(player_id, match_record),
                    );
                    rows.push(stats);
                }
                None => {
                    warn!(
                        player_id = %player_id,
                        discipline = %discipline,
                        "No discipline statistics row, skipping"
                    );
                }
            }
        }

        Ok(rows)
    }
}
