//! Data model shared by the fetch legs and the presentation layer.
//!
//! # Design Decisions
//! - Everything is immutable once decoded
//! - Nothing outlives a single fetch-and-render cycle

pub mod message;
pub mod snapshot;

pub use message::{FavoriteSet, Message};
pub use snapshot::Snapshot;
