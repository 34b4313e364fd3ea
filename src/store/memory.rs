//! In-memory store implementation
//!
//! Reference backend implementing all three persistence seams over a single
//! locked state, which makes the match commit trivially atomic. Used by the
//! test suites and the season simulator; a production deployment would bind
//! these traits to a document or relational database.

use crate::error::RatingEngineError;
use crate::store::audit::AuditSink;
use crate::store::leaderboard::LeaderboardStore;
use crate::store::player::{
    MatchCommit, MatchCommitOutcome, PlayerStore, VersionedPlayer,
};
use crate::types::{
    Discipline, DisciplineStats, LeaderboardCriterion, LeaderboardSnapshot, MatchId, PlayerId,
    PlayerRecord, RatingAuditRecord, SnapshotKey,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
struct InMemoryState {
    players: HashMap<PlayerId, (PlayerRecord, u64)>,
    discipline_stats: HashMap<(PlayerId, Discipline), DisciplineStats>,
    audits: HashMap<MatchId, RatingAuditRecord>,
    snapshots: HashMap<SnapshotKey, LeaderboardSnapshot>,
}

/// In-memory store for players, audit records, and leaderboard snapshots
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<InMemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> crate::error::Result<std::sync::RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|_| {
                RatingEngineError::InternalError {
                    message: "Failed to acquire store read lock".to_string(),
                }
                .into()
            })
    }

    fn write_state(&self) -> crate::error::Result<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|_| {
                RatingEngineError::InternalError {
                    message: "Failed to acquire store write lock".to_string(),
                }
                .into()
            })
    }

    /// Number of audit records stored (for testing)
    pub fn audit_count(&self) -> crate::error::Result<usize> {
        Ok(self.read_state()?.audits.len())
    }
}

#[async_trait]
impl PlayerStore for InMemoryStore {
    async fn get_player(
        &self,
        player_id: &PlayerId,
    ) -> crate::error::Result<Option<VersionedPlayer>> {
        let state = self.read_state()?;

        Ok(state.players.get(player_id).map(|(player, version)| {
            VersionedPlayer {
                player: player.clone(),
                version: *version,
            }
        }))
    }

    async fn create_player(
        &self,
        player: PlayerRecord,
        discipline_stats: Vec<DisciplineStats>,
    ) -> crate::error::Result<()> {
        let mut state = self.write_state()?;

        if state.players.contains_key(&player.id) {
            return Err(RatingEngineError::PersistenceFailure {
                message: format!("Player already exists: {}", player.id),
            }
            .into());
        }

        for stats in &discipline_stats {
            if stats.player_id != player.id {
                return Err(RatingEngineError::PersistenceFailure {
                    message: format!(
                        "Discipline row for {} does not belong to player {}",
                        stats.player_id, player.id
                    ),
                }
                .into());
            }
        }

        let player_id = player.id.clone();
        state.players.insert(player_id.clone(), (player, 0));
        for stats in discipline_stats {
            state
                .discipline_stats
                .insert((player_id.clone(), stats.discipline), stats);
        }

        Ok(())
    }

    async fn list_players(
        &self,
        min_matches: u32,
        criterion: LeaderboardCriterion,
        limit: usize,
    ) -> crate::error::Result<Vec<PlayerRecord>> {
        let state = self.read_state()?;

        let mut qualified: Vec<PlayerRecord> = state
            .players
            .values()
            .filter(|(player, _)| player.total_matches >= min_matches)
            .map(|(player, _)| player.clone())
            .collect();

        // Descending by criterion value, ties broken by player id ascending
        qualified.sort_by(|a, b| {
            criterion
                .value_for(b)
                .partial_cmp(&criterion.value_for(a))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        qualified.truncate(limit);
        Ok(qualified)
    }

    async fn get_discipline_stats(
        &self,
        player_id: &PlayerId,
        discipline: Discipline,
    ) -> crate::error::Result<Option<DisciplineStats>> {
        let state = self.read_state()?;

        Ok(state
            .discipline_stats
            .get(&(player_id.clone(), discipline))
            .cloned())
    }

    async fn apply_match(
        &self,
        commit: MatchCommit,
    ) -> crate::error::Result<MatchCommitOutcome> {
        let mut state = self.write_state()?;

        // Duplicate delivery: the match was already applied, do nothing
        if state.audits.contains_key(&commit.match_id) {
            return Ok(MatchCommitOutcome::AlreadyProcessed);
        }

        // Validate every precondition before touching any state
        for write in &commit.players {
            let (_, current_version) = state.players.get(&write.player.id).ok_or_else(|| {
                RatingEngineError::PlayerNotFound {
                    player_id: write.player.id.clone(),
                }
            })?;

            if *current_version != write.expected_version {
                return Err(RatingEngineError::ConcurrencyConflict {
                    player_id: write.player.id.clone(),
                }
                .into());
            }
        }

        for write in commit.players {
            let id = write.player.id.clone();
            state
                .players
                .insert(id, (write.player, write.expected_version + 1));
        }

        for stats in commit.discipline_stats {
            state
                .discipline_stats
                .insert((stats.player_id.clone(), stats.discipline), stats);
        }

        state.audits.insert(commit.match_id, commit.audit);

        Ok(MatchCommitOutcome::Applied)
    }

    async fn player_count(&self) -> crate::error::Result<usize> {
        Ok(self.read_state()?.players.len())
    }
}

#[async_trait]
impl AuditSink for InMemoryStore {
    async fn find_rating_change(
        &self,
        match_id: &MatchId,
    ) -> crate::error::Result<Option<RatingAuditRecord>> {
        Ok(self.read_state()?.audits.get(match_id).cloned())
    }

    async fn record_rating_change(&self, record: RatingAuditRecord) -> crate::error::Result<()> {
        self.write_state()?
            .audits
            .insert(record.match_id.clone(), record);
        Ok(())
    }
}

#[async_trait]
impl LeaderboardStore for InMemoryStore {
    async fn replace_snapshot(
        &self,
        key: SnapshotKey,
        snapshot: LeaderboardSnapshot,
    ) -> crate::error::Result<()> {
        self.write_state()?.snapshots.insert(key, snapshot);
        Ok(())
    }

    async fn get_snapshot(
        &self,
        key: &SnapshotKey,
    ) -> crate::error::Result<Option<LeaderboardSnapshot>> {
        Ok(self.read_state()?.snapshots.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::player::PlayerWrite;

    fn player(id: &str, rating: i32, matches: u32, wins: u32) -> PlayerRecord {
        PlayerRecord {
            id: id.to_string(),
            rating,
            total_matches: matches,
            wins,
            losses: matches - wins,
            draws: 0,
            win_rate: crate::utils::win_rate(wins, matches),
        }
    }

    fn audit(match_id: &str) -> RatingAuditRecord {
        RatingAuditRecord {
            match_id: match_id.to_string(),
            deltas: vec![],
            recorded_at: crate::utils::current_timestamp(),
        }
    }

    fn commit_for(
        match_id: &str,
        a: PlayerRecord,
        version_a: u64,
        b: PlayerRecord,
        version_b: u64,
    ) -> MatchCommit {
        MatchCommit {
            match_id: match_id.to_string(),
            players: [
                PlayerWrite {
                    player: a,
                    expected_version: version_a,
                },
                PlayerWrite {
                    player: b,
                    expected_version: version_b,
                },
            ],
            discipline_stats: vec![],
            audit: audit(match_id),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_player() {
        let store = InMemoryStore::new();
        store
            .create_player(player("p1", 1200, 0, 0), vec![])
            .await
            .unwrap();

        let versioned = store
            .get_player(&"p1".to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(versioned.player.rating, 1200);
        assert_eq!(versioned.version, 0);

        // Duplicate creation is rejected
        assert!(store
            .create_player(player("p1", 1200, 0, 0), vec![])
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_apply_match_bumps_versions() {
        let store = InMemoryStore::new();
        store
            .create_player(player("a", 1200, 0, 0), vec![])
            .await
            .unwrap();
        store
            .create_player(player("b", 1200, 0, 0), vec![])
            .await
            .unwrap();

        let outcome = store
            .apply_match(commit_for(
                "m1",
                player("a", 1216, 1, 1),
                0,
                player("b", 1184, 1, 0),
                0,
            ))
            .await
            .unwrap();
        assert_eq!(outcome, MatchCommitOutcome::Applied);

        let a = store.get_player(&"a".to_string()).await.unwrap().unwrap();
        assert_eq!(a.player.rating, 1216);
        assert_eq!(a.version, 1);
    }

    #[tokio::test]
    async fn test_stale_version_conflicts_without_partial_write() {
        let store = InMemoryStore::new();
        store
            .create_player(player("a", 1200, 0, 0), vec![])
            .await
            .unwrap();
        store
            .create_player(player("b", 1200, 0, 0), vec![])
            .await
            .unwrap();

        // Second player's expected version is stale
        let result = store
            .apply_match(commit_for(
                "m1",
                player("a", 1216, 1, 1),
                0,
                player("b", 1184, 1, 0),
                7,
            ))
            .await;
        assert!(result.is_err());

        // Neither player moved and no audit record was written
        let a = store.get_player(&"a".to_string()).await.unwrap().unwrap();
        assert_eq!(a.player.rating, 1200);
        assert_eq!(a.version, 0);
        assert_eq!(store.audit_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_match_is_noop() {
        let store = InMemoryStore::new();
        store
            .create_player(player("a", 1200, 0, 0), vec![])
            .await
            .unwrap();
        store
            .create_player(player("b", 1200, 0, 0), vec![])
            .await
            .unwrap();

        let commit = commit_for("m1", player("a", 1216, 1, 1), 0, player("b", 1184, 1, 0), 0);
        assert_eq!(
            store.apply_match(commit.clone()).await.unwrap(),
            MatchCommitOutcome::Applied
        );
        assert_eq!(
            store.apply_match(commit).await.unwrap(),
            MatchCommitOutcome::AlreadyProcessed
        );

        // First result stands
        let a = store.get_player(&"a".to_string()).await.unwrap().unwrap();
        assert_eq!(a.player.rating, 1216);
        assert_eq!(a.version, 1);
    }

    #[tokio::test]
    async fn test_list_players_filters_sorts_and_caps() {
        let store = InMemoryStore::new();
        store
            .create_player(player("low", 1100, 2, 1), vec![])
            .await
            .unwrap();
        store
            .create_player(player("mid", 1300, 8, 4), vec![])
            .await
            .unwrap();
        store
            .create_player(player("top", 1500, 12, 9), vec![])
            .await
            .unwrap();

        let listed = store
            .list_players(5, LeaderboardCriterion::Rating, 100)
            .await
            .unwrap();
        let ids: Vec<&str> = listed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "mid"]);

        let capped = store
            .list_players(0, LeaderboardCriterion::Rating, 1)
            .await
            .unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].id, "top");
    }

    #[tokio::test]
    async fn test_list_players_tie_break_is_id_ascending() {
        let store = InMemoryStore::new();
        store
            .create_player(player("zeta", 1300, 6, 3), vec![])
            .await
            .unwrap();
        store
            .create_player(player("alpha", 1300, 6, 3), vec![])
            .await
            .unwrap();

        let listed = store
            .list_players(0, LeaderboardCriterion::Rating, 100)
            .await
            .unwrap();
        assert_eq!(listed[0].id, "alpha");
        assert_eq!(listed[1].id, "zeta");
    }

    #[tokio::test]
    async fn test_discipline_rows_written_with_commit() {
        let store = InMemoryStore::new();
        let rows: Vec<DisciplineStats> = Discipline::ALL
            .iter()
            .map(|d| DisciplineStats::new("a".to_string(), *d))
            .collect();
        store
            .create_player(player("a", 1200, 0, 0), rows)
            .await
            .unwrap();
        store
            .create_player(player("b", 1200, 0, 0), vec![])
            .await
            .unwrap();

        let mut updated = DisciplineStats::new("a".to_string(), Discipline::NineBall);
        updated.total_matches = 1;
        updated.wins = 1;
        updated.win_rate = 1.0;

        let mut commit =
            commit_for("m1", player("a", 1216, 1, 1), 0, player("b", 1184, 1, 0), 0);
        commit.discipline_stats = vec![updated];
        store.apply_match(commit).await.unwrap();

        let stats = store
            .get_discipline_stats(&"a".to_string(), Discipline::NineBall)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.wins, 1);

        // Other rows untouched
        let other = store
            .get_discipline_stats(&"a".to_string(), Discipline::Snooker)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(other.total_matches, 0);
    }

    #[tokio::test]
    async fn test_snapshot_replacement() {
        let store = InMemoryStore::new();
        let key = SnapshotKey::global(LeaderboardCriterion::Rating);

        assert!(store.get_snapshot(&key).await.unwrap().is_none());

        let snapshot = LeaderboardSnapshot {
            name: "Rating Leaderboard".to_string(),
            criterion: LeaderboardCriterion::Rating,
            scope: "Global".to_string(),
            time_period: "All time".to_string(),
            min_matches_required: 5,
            rankings: vec![],
            total_players: 0,
            last_updated: crate::utils::current_timestamp(),
        };
        store
            .replace_snapshot(key.clone(), snapshot)
            .await
            .unwrap();

        assert!(store.get_snapshot(&key).await.unwrap().is_some());
    }
}
