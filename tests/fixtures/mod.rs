//! Shared fixtures for integration tests

use cue_score::config::{EloConfig, LeaderboardConfig, ProcessingSettings};
use cue_score::leaderboard::LeaderboardBuilder;
use cue_score::processor::MatchResultProcessor;
use cue_score::rating::EloRatingCalculator;
use cue_score::stats::AggregateUpdater;
use cue_score::store::InMemoryStore;
use cue_score::types::{Discipline, MatchRecord, MatchStatus};
use std::sync::Arc;

/// A fully wired engine backed by one in-memory store
pub struct TestEngine {
    pub store: Arc<InMemoryStore>,
    pub processor: Arc<MatchResultProcessor>,
    pub builder: Arc<LeaderboardBuilder>,
    pub updater: AggregateUpdater,
}

impl TestEngine {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let calculator = Arc::new(EloRatingCalculator::new(EloConfig::default()).unwrap());
        let processor = Arc::new(MatchResultProcessor::new(
            store.clone(),
            store.clone(),
            calculator,
            // Generous retry budget: the concurrency tests deliberately
            // hammer a single player record
            ProcessingSettings {
                max_retry_attempts: 50,
                retry_delay_ms: 1,
            },
        ));
        let builder = Arc::new(
            LeaderboardBuilder::new(store.clone(), store.clone(), LeaderboardConfig::default())
                .unwrap(),
        );
        let updater = AggregateUpdater::new(store.clone(), 1200);

        Self {
            store,
            processor,
            builder,
            updater,
        }
    }

    pub async fn seed_players(&self, ids: &[&str]) {
        for id in ids {
            self.updater
                .initialize_player(&id.to_string())
                .await
                .unwrap();
        }
    }
}

/// Build a completed ranked 9-ball match record
pub fn completed_match(match_id: &str, p1: &str, p2: &str, winner: Option<&str>) -> MatchRecord {
    MatchRecord {
        match_id: match_id.to_string(),
        player1_id: p1.to_string(),
        player2_id: p2.to_string(),
        winner_id: winner.map(str::to_string),
        is_ranked: true,
        discipline: Some(Discipline::NineBall),
        status: MatchStatus::Completed,
    }
}
