//! Rate acquisition error types.

use thiserror::Error;

use crate::source::SourceId;

/// Failure of a single rate-source attempt. Each of these is recovered
/// locally by the fallback orchestrator; none of them reach the caller.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Provider did not respond within the attempt bound.
    #[error("provider timed out")]
    Timeout,

    /// Transport-level failure (DNS, TLS, connection, HTTP status).
    #[error("network error: {0}")]
    Network(String),

    /// Response was not valid JSON or not the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Parsed fine, but a required rate is absent or not a finite
    /// positive number.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Failure of a whole acquisition pass. The only acquisition failure the
/// caller ever sees; the previous snapshot stays authoritative.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Every adapter in the priority list failed.
    #[error("all rate sources failed")]
    AllSourcesFailed {
        /// What each source failed with, in attempt order.
        attempts: Vec<(SourceId, FetchError)>,
    },
}
