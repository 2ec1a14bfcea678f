//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap a single fetch attempt with a deadline
//! - Drop the attempt's future when the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - The caller maps an elapsed deadline into its own error type

use std::future::Future;
use std::time::Duration;
use tokio::time;

/// Run `fut` with a deadline; on expiry return `on_timeout(limit)`.
pub async fn enforce<T, E, Fut>(
    limit: Duration,
    fut: Fut,
    on_timeout: impl FnOnce(Duration) -> E,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    match time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout(limit)),
    }
}
