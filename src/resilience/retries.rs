//! Retry logic.
//!
//! # Responsibilities
//! - Decide whether a failed attempt may run again
//! - Execute retries with exponential backoff + jitter
//!
//! # Design Decisions
//! - The error type classifies itself through `Retryable`
//! - `retries` counts extra attempts: 1 means at most two attempts in total
//! - Non-retryable errors return immediately

use std::fmt::Display;
use std::future::Future;

use crate::config::FetchConfig;
use crate::resilience::backoff::retry_delay;

/// Errors that know whether another attempt could succeed.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// How many extra attempts to make and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    /// A single immediate retry.
    pub const fn once() -> Self {
        Self {
            retries: 1,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            retries: config.retries,
            base_delay_ms: config.backoff_base_ms,
            max_delay_ms: config.backoff_max_ms,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::once()
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// policy's retries are used up. `op` receives the zero-based attempt number.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    E: Retryable + Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.retries => {
                attempt += 1;
                let delay = retry_delay(policy, attempt);
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
}
