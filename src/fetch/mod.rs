//! Fetch legs: one GET, decoded into a typed value, defaulted on failure.
//!
//! # Data Flow
//! ```text
//! url
//!     → client.rs (GET with a per-attempt deadline)
//!     → On transport failure: one retry (resilience::retries)
//!     → serde_json decode
//!     → On any error: caller's default value
//! ```
//!
//! # Design Decisions
//! - Status codes are not inspected; the body is decoded as-is
//! - Decode failures are never retried
//! - `fetch_one` is total, `try_fetch` keeps the error

pub mod client;
pub mod error;

pub use client::Fetcher;
pub use error::FetchError;
