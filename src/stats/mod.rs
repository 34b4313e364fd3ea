//! Player aggregate maintenance
//!
//! This module applies match outcomes to per-player aggregate statistics and
//! owns player initialization, including the fixed set of per-discipline
//! statistic rows every player starts with.

use crate::store::player::PlayerStore;
use crate::types::{
    Discipline, DisciplineStats, MatchRecord, PlayerId, PlayerOutcome, PlayerRecord,
};
use crate::utils::win_rate;
use std::sync::Arc;
use tracing::debug;

/// Applies match outcomes to persisted player aggregates
pub struct AggregateUpdater {
    players: Arc<dyn PlayerStore>,
    initial_rating: i32,
}

impl AggregateUpdater {
    pub fn new(players: Arc<dyn PlayerStore>, initial_rating: i32) -> Self {
        Self {
            players,
            initial_rating,
        }
    }

    /// Create a player record at the initial rating together with one zeroed
    /// statistics row per discipline (8-ball, 9-ball, 10-ball, snooker)
    pub async fn initialize_player(&self, player_id: &PlayerId) -> crate::error::Result<PlayerRecord> {
        let player = PlayerRecord::new(player_id.clone(), self.initial_rating);
        let rows: Vec<DisciplineStats> = Discipline::ALL
            .iter()
            .map(|discipline| DisciplineStats::new(player_id.clone(), *discipline))
            .collect();

        self.players.create_player(player.clone(), rows).await?;
        debug!(player_id = %player_id, rating = player.rating, "Initialized player");

        Ok(player)
    }

    /// Outcome of a match from one participant's perspective
    pub fn outcome_for(player_id: &PlayerId, match_record: &MatchRecord) -> PlayerOutcome {
        match match_record.winner_id.as_ref() {
            None => PlayerOutcome::Drew,
            Some(winner) if winner == player_id => PlayerOutcome::Won,
            Some(_) => PlayerOutcome::Lost,
        }
    }

    /// Apply one match outcome to a player's aggregate counters
    ///
    /// Increments total_matches and exactly one of wins/losses/draws, then
    /// recomputes the win rate. Ratings are not touched here; they flow from
    /// the rating calculator through the same commit.
    pub fn apply_outcome(record: &mut PlayerRecord, outcome: PlayerOutcome) {
        record.total_matches += 1;
        match outcome {
            PlayerOutcome::Won => record.wins += 1,
            PlayerOutcome::Lost => record.losses += 1,
            PlayerOutcome::Drew => record.draws += 1,
        }
        record.win_rate = win_rate(record.wins, record.total_matches);
    }

    /// Apply one match outcome to a per-discipline statistics row
    pub fn apply_discipline_outcome(stats: &mut DisciplineStats, outcome: PlayerOutcome) {
        stats.total_matches += 1;
        match outcome {
            PlayerOutcome::Won => stats.wins += 1,
            PlayerOutcome::Lost => stats.losses += 1,
            PlayerOutcome::Drew => stats.draws += 1,
        }
        stats.win_rate = win_rate(stats.wins, stats.total_matches);
        stats.last_updated = crate::utils::current_timestamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::types::MatchStatus;

    fn match_record(winner: Option<&str>) -> MatchRecord {
        MatchRecord {
            match_id: "m1".to_string(),
            player1_id: "a".to_string(),
            player2_id: "b".to_string(),
            winner_id: winner.map(str::to_string),
            is_ranked: true,
            discipline: None,
            status: MatchStatus::Completed,
        }
    }

    #[tokio::test]
    async fn test_initialize_player_creates_four_discipline_rows() {
        let store = Arc::new(InMemoryStore::new());
        let updater = AggregateUpdater::new(store.clone(), 1200);

        let player = updater
            .initialize_player(&"p1".to_string())
            .await
            .unwrap();
        assert_eq!(player.rating, 1200);
        assert_eq!(player.total_matches, 0);

        for discipline in Discipline::ALL {
            let stats = store
                .get_discipline_stats(&"p1".to_string(), discipline)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(stats.total_matches, 0);
            assert_eq!(stats.wins, 0);
            assert_eq!(stats.losses, 0);
            assert_eq!(stats.draws, 0);
            assert_eq!(stats.win_rate, 0.0);
        }
    }

    #[test]
    fn test_outcome_for() {
        let record = match_record(Some("a"));
        assert_eq!(
            AggregateUpdater::outcome_for(&"a".to_string(), &record),
            PlayerOutcome::Won
        );
        assert_eq!(
            AggregateUpdater::outcome_for(&"b".to_string(), &record),
            PlayerOutcome::Lost
        );

        let draw = match_record(None);
        assert_eq!(
            AggregateUpdater::outcome_for(&"a".to_string(), &draw),
            PlayerOutcome::Drew
        );
    }

    #[test]
    fn test_apply_outcome_counters_and_win_rate() {
        let mut record = PlayerRecord::new("p".to_string(), 1200);

        AggregateUpdater::apply_outcome(&mut record, PlayerOutcome::Won);
        AggregateUpdater::apply_outcome(&mut record, PlayerOutcome::Lost);
        AggregateUpdater::apply_outcome(&mut record, PlayerOutcome::Drew);
        AggregateUpdater::apply_outcome(&mut record, PlayerOutcome::Won);

        assert_eq!(record.total_matches, 4);
        assert_eq!(record.wins, 2);
        assert_eq!(record.losses, 1);
        assert_eq!(record.draws, 1);
        assert_eq!(
            record.wins + record.losses + record.draws,
            record.total_matches
        );
        assert_eq!(record.win_rate, 0.5);
    }

    #[test]
    fn test_apply_discipline_outcome() {
        let mut stats = DisciplineStats::new("p".to_string(), Discipline::EightBall);

        AggregateUpdater::apply_discipline_outcome(&mut stats, PlayerOutcome::Won);
        assert_eq!(stats.total_matches, 1);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.win_rate, 1.0);

        AggregateUpdater::apply_discipline_outcome(&mut stats, PlayerOutcome::Lost);
        assert_eq!(stats.total_matches, 2);
        assert_eq!(stats.win_rate, 0.5);
    }
}
