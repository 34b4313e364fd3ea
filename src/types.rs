//! Common types used throughout the rating engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for matches
pub type MatchId = String;

/// Lifecycle status of a match
///
/// Serialized forms match the status strings stored by the match-lifecycle
/// collaborator ("In Progress" contains a space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
    Disputed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStatus::Scheduled => write!(f, "Scheduled"),
            MatchStatus::InProgress => write!(f, "In Progress"),
            MatchStatus::Completed => write!(f, "Completed"),
            MatchStatus::Cancelled => write!(f, "Cancelled"),
            MatchStatus::Disputed => write!(f, "Disputed"),
        }
    }
}

/// Billiards discipline a match is played under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    #[serde(rename = "8-ball")]
    EightBall,
    #[serde(rename = "9-ball")]
    NineBall,
    #[serde(rename = "10-ball")]
    TenBall,
    #[serde(rename = "snooker")]
    Snooker,
}

impl Discipline {
    /// Every discipline tracked per player
    pub const ALL: [Discipline; 4] = [
        Discipline::EightBall,
        Discipline::NineBall,
        Discipline::TenBall,
        Discipline::Snooker,
    ];
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discipline::EightBall => write!(f, "8-ball"),
            Discipline::NineBall => write!(f, "9-ball"),
            Discipline::TenBall => write!(f, "10-ball"),
            Discipline::Snooker => write!(f, "snooker"),
        }
    }
}

/// Persisted aggregate state for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    /// Current rating, never below the configured floor
    pub rating: i32,
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Derived: wins / total_matches, 0.0 when no matches played
    pub win_rate: f64,
}

impl PlayerRecord {
    /// Create a fresh record at the given initial rating with zeroed counters
    pub fn new(id: PlayerId, initial_rating: i32) -> Self {
        Self {
            id,
            rating: initial_rating,
            total_matches: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            win_rate: 0.0,
        }
    }
}

/// Per-discipline statistics row, one per (player, discipline)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisciplineStats {
    pub player_id: PlayerId,
    pub discipline: Discipline,
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub win_rate: f64,
    pub last_updated: DateTime<Utc>,
}

impl DisciplineStats {
    /// Create a zeroed row for a new player
    pub fn new(player_id: PlayerId, discipline: Discipline) -> Self {
        Self {
            player_id,
            discipline,
            total_matches: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            win_rate: 0.0,
            last_updated: crate::utils::current_timestamp(),
        }
    }
}

/// A finalized contest between two players
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    /// None means the match ended in a draw
    pub winner_id: Option<PlayerId>,
    pub is_ranked: bool,
    /// Discipline to credit per-discipline statistics to, when tracked
    pub discipline: Option<Discipline>,
    pub status: MatchStatus,
}

/// Event delivered by the match-lifecycle collaborator when a match
/// transitions into Completed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCompleted {
    pub match_id: MatchId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub winner_id: Option<PlayerId>,
    pub is_ranked: bool,
    pub discipline: Option<Discipline>,
    pub timestamp: DateTime<Utc>,
}

impl From<MatchCompleted> for MatchRecord {
    fn from(event: MatchCompleted) -> Self {
        Self {
            match_id: event.match_id,
            player1_id: event.player1_id,
            player2_id: event.player2_id,
            winner_id: event.winner_id,
            is_ranked: event.is_ranked,
            discipline: event.discipline,
            status: MatchStatus::Completed,
        }
    }
}

/// Outcome of a match from one participant's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerOutcome {
    Won,
    Lost,
    Drew,
}

/// Outcome of a match expressed for the rating calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchScore {
    PlayerAWin,
    PlayerBWin,
    Draw,
}

impl MatchScore {
    /// Actual score for player A: 1 = won, 0 = lost, 0.5 = draw
    pub fn score_a(&self) -> f64 {
        match self {
            MatchScore::PlayerAWin => 1.0,
            MatchScore::PlayerBWin => 0.0,
            MatchScore::Draw => 0.5,
        }
    }

    /// Actual score for player B
    pub fn score_b(&self) -> f64 {
        1.0 - self.score_a()
    }
}

/// Rating movement for one participant of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDelta {
    pub player_id: PlayerId,
    pub before: i32,
    pub after: i32,
    pub change: i32,
}

/// Auditable record of the rating changes applied for one match
///
/// Persisted exactly once per processed match; its presence is the
/// idempotency marker that prevents reprocessing. Unranked matches and
/// draws are recorded with an empty delta list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingAuditRecord {
    pub match_id: MatchId,
    pub deltas: Vec<RatingDelta>,
    pub recorded_at: DateTime<Utc>,
}

/// Ranking criterion for a leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderboardCriterion {
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "win_rate")]
    WinRate,
    #[serde(rename = "wins")]
    Wins,
}

impl LeaderboardCriterion {
    /// Every criterion rebuilt on the standard schedule
    pub const ALL: [LeaderboardCriterion; 3] = [
        LeaderboardCriterion::Rating,
        LeaderboardCriterion::WinRate,
        LeaderboardCriterion::Wins,
    ];

    /// Display name of the snapshot built for this criterion
    pub fn snapshot_name(&self) -> &'static str {
        match self {
            LeaderboardCriterion::Rating => "Rating Leaderboard",
            LeaderboardCriterion::WinRate => "Win Rate Leaderboard",
            LeaderboardCriterion::Wins => "Total Wins Leaderboard",
        }
    }

    /// The criterion value for a player, as the snapshot stores it
    pub fn value_for(&self, player: &PlayerRecord) -> f64 {
        match self {
            LeaderboardCriterion::Rating => player.rating as f64,
            LeaderboardCriterion::WinRate => player.win_rate,
            LeaderboardCriterion::Wins => player.wins as f64,
        }
    }
}

impl std::fmt::Display for LeaderboardCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardCriterion::Rating => write!(f, "rating"),
            LeaderboardCriterion::WinRate => write!(f, "win_rate"),
            LeaderboardCriterion::Wins => write!(f, "wins"),
        }
    }
}

/// Identity of a materialized leaderboard snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub criterion: LeaderboardCriterion,
    pub scope: String,
    pub time_period: String,
}

impl SnapshotKey {
    /// Key for the all-time global snapshot of a criterion
    pub fn global(criterion: LeaderboardCriterion) -> Self {
        Self {
            criterion,
            scope: "Global".to_string(),
            time_period: "All time".to_string(),
        }
    }
}

/// One row of a leaderboard snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position
    pub rank: u32,
    pub player_id: PlayerId,
    pub value: f64,
    /// Movement since the previous snapshot; never computed, always 0
    pub change_from_last: i64,
}

/// A named, versioned materialized ranking, rebuilt wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    pub name: String,
    pub criterion: LeaderboardCriterion,
    pub scope: String,
    pub time_period: String,
    pub min_matches_required: u32,
    pub rankings: Vec<RankingEntry>,
    pub total_players: usize,
    pub last_updated: DateTime<Utc>,
}

impl LeaderboardSnapshot {
    /// The key this snapshot replaces
    pub fn key(&self) -> SnapshotKey {
        SnapshotKey {
            criterion: self.criterion,
            scope: self.scope.clone(),
            time_period: self.time_period.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_status_display() {
        assert_eq!(MatchStatus::InProgress.to_string(), "In Progress");
        assert_eq!(MatchStatus::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_discipline_display_matches_row_names() {
        let names: Vec<String> = Discipline::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(names, vec!["8-ball", "9-ball", "10-ball", "snooker"]);
    }

    #[test]
    fn test_match_score_values() {
        assert_eq!(MatchScore::PlayerAWin.score_a(), 1.0);
        assert_eq!(MatchScore::PlayerAWin.score_b(), 0.0);
        assert_eq!(MatchScore::Draw.score_a(), 0.5);
        assert_eq!(MatchScore::Draw.score_b(), 0.5);
    }

    #[test]
    fn test_new_player_record() {
        let player = PlayerRecord::new("p1".to_string(), 1200);
        assert_eq!(player.rating, 1200);
        assert_eq!(player.total_matches, 0);
        assert_eq!(player.win_rate, 0.0);
    }

    #[test]
    fn test_snapshot_key_global() {
        let key = SnapshotKey::global(LeaderboardCriterion::Rating);
        assert_eq!(key.scope, "Global");
        assert_eq!(key.time_period, "All time");
    }

    #[test]
    fn test_completed_event_into_record() {
        let event = MatchCompleted {
            match_id: "m1".to_string(),
            player1_id: "a".to_string(),
            player2_id: "b".to_string(),
            winner_id: Some("a".to_string()),
            is_ranked: true,
            discipline: Some(Discipline::NineBall),
            timestamp: crate::utils::current_timestamp(),
        };

        let record: MatchRecord = event.into();
        assert_eq!(record.status, MatchStatus::Completed);
        assert_eq!(record.winner_id.as_deref(), Some("a"));
    }
}
