//! Quoter configuration.

use std::time::Duration;

use ripefx_common::time::{constants, DurationExt};

/// Configuration for the quote service.
#[derive(Debug, Clone)]
pub struct QuoterConfig {
    /// Interval between scheduled rate refreshes.
    pub refresh_interval: Duration,
    /// Bound on a single provider fetch attempt.
    pub fetch_timeout: Duration,
    /// Log level used when RUST_LOG is not set.
    pub log_level: String,
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            refresh_interval: constants::refresh_interval().as_std(),
            fetch_timeout: constants::fetch_timeout().as_std(),
            log_level: "info".to_string(),
        }
    }
}

impl QuoterConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(secs) = std::env::var("RIPEFX_REFRESH_INTERVAL_SECS") {
            if let Ok(secs) = secs.parse() {
                config.refresh_interval = Duration::from_secs(secs);
            }
        }

        if let Ok(secs) = std::env::var("RIPEFX_FETCH_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.fetch_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh_interval.is_zero() {
            return Err("Refresh interval cannot be zero".to_string());
        }

        if self.fetch_timeout.is_zero() {
            return Err("Fetch timeout cannot be zero".to_string());
        }

        if self.fetch_timeout >= self.refresh_interval {
            return Err("Fetch timeout must be shorter than the refresh interval".to_string());
        }

        Ok(())
    }
}
