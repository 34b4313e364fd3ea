//! Configuration management for the rating engine
//!
//! This module handles configuration loading from environment variables or
//! TOML files, validation, and default values.

pub mod app;
pub mod leaderboard;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ProcessingSettings, ServiceSettings};
pub use leaderboard::LeaderboardConfig;
pub use rating::EloConfig;
