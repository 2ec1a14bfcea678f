//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` overrides the configured level
//! - Events go to stderr so stdout carries only rendered output

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor a level is given.
pub const DEFAULT_FILTER: &str = "json_join=info";

/// Build the filter: `RUST_LOG` first, then `level`.
///
/// A bare level such as `debug` is scoped to this crate; anything else is
/// taken as a full filter directive.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match level {
            "trace" | "debug" | "info" | "warn" | "error" => format!("json_join={}", level),
            "" => DEFAULT_FILTER.to_string(),
            other => other.to_string(),
        };
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    })
}

/// Install the global subscriber. Call once, from the binary.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
