//! Lifecycle management for the binary.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT / SIGTERM → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → refresh loop exits → in-flight join cancelled
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
