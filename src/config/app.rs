//! Main application configuration
//!
//! This module defines the primary configuration structures for the rating
//! engine, including environment variable loading, TOML file loading, and
//! validation.

use crate::config::{EloConfig, LeaderboardConfig};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub processing: ProcessingSettings,
    pub elo: EloConfig,
    pub leaderboard: LeaderboardConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Match-processing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSettings {
    /// Maximum attempts when an optimistic write collides
    pub max_retry_attempts: u32,
    /// Delay between retry attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "cue-score".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            max_retry_attempts: 3,
            retry_delay_ms: 50,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Processing settings
        if let Ok(retries) = env::var("MAX_RETRY_ATTEMPTS") {
            config.processing.max_retry_attempts = retries
                .parse()
                .map_err(|_| anyhow!("Invalid MAX_RETRY_ATTEMPTS value: {}", retries))?;
        }
        if let Ok(delay) = env::var("RETRY_DELAY_MS") {
            config.processing.retry_delay_ms = delay
                .parse()
                .map_err(|_| anyhow!("Invalid RETRY_DELAY_MS value: {}", delay))?;
        }

        // Elo settings
        if let Ok(k) = env::var("ELO_K_FACTOR") {
            config.elo.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_K_FACTOR value: {}", k))?;
        }
        if let Ok(initial) = env::var("ELO_INITIAL_RATING") {
            config.elo.initial_rating = initial
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_INITIAL_RATING value: {}", initial))?;
        }
        if let Ok(floor) = env::var("ELO_RATING_FLOOR") {
            config.elo.rating_floor = floor
                .parse()
                .map_err(|_| anyhow!("Invalid ELO_RATING_FLOOR value: {}", floor))?;
        }

        // Leaderboard settings
        if let Ok(limit) = env::var("LEADERBOARD_MAX_ENTRIES") {
            config.leaderboard.max_entries = limit
                .parse()
                .map_err(|_| anyhow!("Invalid LEADERBOARD_MAX_ENTRIES value: {}", limit))?;
        }
        if let Ok(interval) = env::var("LEADERBOARD_REBUILD_INTERVAL_SECONDS") {
            config.leaderboard.rebuild_interval_seconds = interval.parse().map_err(|_| {
                anyhow!(
                    "Invalid LEADERBOARD_REBUILD_INTERVAL_SECONDS value: {}",
                    interval
                )
            })?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Get retry delay as Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.processing.retry_delay_ms)
    }

    /// Get rebuild interval as Duration
    pub fn rebuild_interval(&self) -> Duration {
        Duration::from_secs(self.leaderboard.rebuild_interval_seconds)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if config.processing.max_retry_attempts == 0 {
        return Err(anyhow!("Max retry attempts must be greater than 0"));
    }

    config.elo.validate()?;
    config.leaderboard.validate()?;

    Ok(())
}
