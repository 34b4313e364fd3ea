//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the library.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating-engine scenarios
#[derive(Debug, thiserror::Error)]
pub enum RatingEngineError {
    #[error("Invalid match state: {reason}")]
    InvalidMatchState { reason: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Concurrent update conflict on player: {player_id}")]
    ConcurrencyConflict { player_id: String },

    #[error("Persistence failure: {message}")]
    PersistenceFailure { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal engine error: {message}")]
    InternalError { message: String },
}
