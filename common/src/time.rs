//! Time utilities and timing constants.

use chrono::{DateTime, Duration, Utc};

/// Quoting-core timing constants.
pub mod constants {
    use super::Duration;

    /// Interval between scheduled rate refreshes (2 minutes).
    pub fn refresh_interval() -> Duration {
        Duration::seconds(120)
    }

    /// Age past which a snapshot counts as stale (10 minutes).
    pub fn stale_threshold() -> Duration {
        Duration::minutes(10)
    }

    /// Bound on a single provider fetch attempt (5 seconds).
    pub fn fetch_timeout() -> Duration {
        Duration::seconds(5)
    }
}

/// A timestamp with timezone (always UTC).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Duration extensions for convenient conversion.
pub trait DurationExt {
    fn as_std(&self) -> std::time::Duration;
}

impl DurationExt for Duration {
    fn as_std(&self) -> std::time::Duration {
        self.to_std().unwrap_or(std::time::Duration::ZERO)
    }
}
