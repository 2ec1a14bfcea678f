//! HTTP client wrapper for fetch legs.

use std::time::Duration;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::FetchConfig;
use crate::fetch::error::FetchError;
use crate::observability::metrics;
use crate::resilience::{self, RetryPolicy};

/// Performs GET-then-decode for a single leg.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Build a fetcher with its own `reqwest` client.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self::with_client(
            client,
            config.timeout(),
            RetryPolicy::from_config(config),
        ))
    }

    /// Use an existing client, e.g. one configured without system proxies.
    pub fn with_client(client: Client, timeout: Duration, policy: RetryPolicy) -> Self {
        Self {
            client,
            timeout,
            policy,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch and decode `url`, substituting `default` on any failure.
    pub async fn fetch_one<T: DeserializeOwned>(&self, url: &Url, default: T) -> T {
        match self.try_fetch(url).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, kind = e.kind(), "Fetch failed, using default value");
                metrics::record_defaulted(e.kind());
                default
            }
        }
    }

    /// Fetch and decode `url`, keeping the error.
    ///
    /// Transport failures are retried per the policy; decode failures are not.
    pub async fn try_fetch<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        let body = resilience::retry(&self.policy, |attempt| self.fetch_body(url, attempt)).await?;
        let value = serde_json::from_slice(&body)?;
        tracing::debug!(url = %url, bytes = body.len(), "Fetch decoded");
        Ok(value)
    }

    async fn fetch_body(&self, url: &Url, attempt: u32) -> Result<Vec<u8>, FetchError> {
        metrics::record_attempt();
        tracing::debug!(url = %url, attempt, "GET");

        resilience::enforce(
            self.timeout,
            async {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    tracing::warn!(url = %url, status = %status, "Non-success status, decoding body anyway");
                }
                let body = response.bytes().await?;
                Ok::<_, FetchError>(body.to_vec())
            },
            FetchError::Timeout,
        )
        .await
    }
}
