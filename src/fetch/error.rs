//! Leg-level error taxonomy.

use std::time::Duration;
use thiserror::Error;

use crate::resilience::Retryable;

/// Why a fetch leg failed. Never escapes `Fetcher::fetch_one`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, request or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The attempt did not finish before its deadline.
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The body was not valid JSON for the target type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Transport-class failures: the only ones worth another attempt.
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Timeout(_))
    }

    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Timeout(_) => "timeout",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl Retryable for FetchError {
    fn is_retryable(&self) -> bool {
        self.is_transport()
    }
}
