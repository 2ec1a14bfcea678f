//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! fetch legs and joins produce:
//!     → logging.rs (subscriber setup for structured events)
//!     → metrics.rs (counters)
//!     → tracing.rs (one span per leg, carrying the join id)
//! ```
//!
//! # Design Decisions
//! - Structured fields (url, join_id, leg) on every event
//! - Metrics go through the `metrics` facade; without an installed
//!   recorder they are no-ops

pub mod logging;
pub mod metrics;
pub mod tracing;
