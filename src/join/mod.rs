//! Join subsystem: run independent legs concurrently, deliver once.
//!
//! # Data Flow
//! ```text
//! joiner.rs
//!     → spawn every leg on the runtime (Abortable)
//!     → each leg writes its slot in latch.rs and counts down
//!     → the leg that reaches zero sends the combined value (oneshot)
//!     → handle.rs: InFlightJoin::wait() hands it to the consumer
//! ```
//!
//! # State Machine
//! ```text
//! Idle → Pending → PartiallySettled → Settled → Delivered
//!            └────────────┴───────────────┴────→ Cancelled
//! ```
//!
//! # Design Decisions
//! - Delivery is all-or-nothing; partial results are never observable
//! - Delivered and Cancelled are decided by one compare-exchange
//! - A `Joiner` cancels its previous join when a new one starts
//! - No retries at this level; legs retry internally

pub mod handle;
pub mod joiner;
mod latch;

pub use handle::{CancelHandle, InFlightJoin, JoinState, JoinStatus};
pub use joiner::{join_all, join_two, Joiner};
