//! Message board: the two-leg join of messages and favorites.
//!
//! # Responsibilities
//! - Own the fetcher, the endpoint URLs and the joiner
//! - Start one join per trigger, cancelling the previous one
//! - Hand the presentation layer a single `Snapshot`
//!
//! # Design Decisions
//! - A failed leg degrades to its empty default, never to an error
//! - The demo delay hook is off unless configured

pub mod service;

pub use service::{BoardError, MessageBoard, Sources};
