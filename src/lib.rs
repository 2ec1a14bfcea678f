//! Concurrent JSON fetch-and-join library.

pub mod board;
pub mod config;
pub mod domain;
pub mod fetch;
pub mod join;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod resilience;

pub use board::MessageBoard;
pub use config::JoinConfig;
pub use domain::{FavoriteSet, Message, Snapshot};
pub use fetch::Fetcher;
pub use join::{join_all, join_two, InFlightJoin, JoinState, Joiner};
