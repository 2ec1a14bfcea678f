//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! One fetch leg:
//!     → timeouts.rs (deadline per attempt)
//!     → On transport failure: retries.rs (retry with backoff)
//!     → backoff.rs (delay before the next attempt)
//! ```
//!
//! # Design Decisions
//! - Every attempt has a deadline
//! - Only errors that report themselves retryable are retried
//! - No retry state survives a single leg

pub mod backoff;
pub mod retries;
pub mod timeouts;

pub use retries::{retry, RetryPolicy, Retryable};
pub use timeouts::enforce;
