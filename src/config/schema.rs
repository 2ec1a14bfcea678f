//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct JoinConfig {
    /// Upstream JSON endpoints.
    pub sources: SourcesConfig,

    /// Per-leg fetch behavior.
    pub fetch: FetchConfig,

    /// Test-only hooks. Empty by default.
    pub demo: DemoConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Endpoints for the two legs of the message board join.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Returns a JSON array of `{id, from, message}` objects.
    pub messages_url: String,

    /// Returns a JSON array of message ids.
    pub favorites_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            messages_url: "https://www.hackingwithswift.com/samples/user-messages.json".to_string(),
            favorites_url: "https://www.hackingwithswift.com/samples/user-favorites.json".to_string(),
        }
    }
}

/// Fetch leg configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Deadline for a single attempt (send + body read) in milliseconds.
    pub timeout_ms: u64,

    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Extra attempts after a transport failure.
    pub retries: u32,

    /// Base delay before a retry in milliseconds (0 = retry immediately).
    pub backoff_base_ms: u64,

    /// Upper bound for the retry delay in milliseconds.
    pub backoff_max_ms: u64,

    /// User-Agent header sent with every GET.
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 5_000,
            retries: 1,
            backoff_base_ms: 0,
            backoff_max_ms: 2_000,
            user_agent: concat!("json-join/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Demo hooks. Never active unless configured explicitly.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Random delay `[min, max]` in milliseconds injected before the favorites leg.
    pub leg_delay_ms: Option<(u64, u64)>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
