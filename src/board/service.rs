//! Message board service.

use std::time::Duration;
use rand::Rng;
use thiserror::Error;
use url::Url;

use crate::config::{validate_config, ConfigError, JoinConfig, SourcesConfig};
use crate::config::validation::parse_endpoint;
use crate::domain::{FavoriteSet, Message, Snapshot};
use crate::fetch::{FetchError, Fetcher};
use crate::join::{InFlightJoin, JoinState, Joiner};

/// Errors building a board. Fetching itself never fails.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] FetchError),
}

/// Parsed endpoint URLs for both legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
    pub messages: Url,
    pub favorites: Url,
}

impl Sources {
    pub fn new(messages: Url, favorites: Url) -> Self {
        Self { messages, favorites }
    }

    pub fn from_config(config: &SourcesConfig) -> Result<Self, ConfigError> {
        let messages = parse_endpoint("sources.messages_url", &config.messages_url);
        let favorites = parse_endpoint("sources.favorites_url", &config.favorites_url);
        match (messages, favorites) {
            (Ok(messages), Ok(favorites)) => Ok(Self::new(messages, favorites)),
            (messages, favorites) => Err(ConfigError::Validation(
                [messages.err(), favorites.err()].into_iter().flatten().collect(),
            )),
        }
    }
}

/// Fetches messages and favorites together, one join per trigger.
#[derive(Debug)]
pub struct MessageBoard {
    fetcher: Fetcher,
    sources: Sources,
    leg_delay_ms: Option<(u64, u64)>,
    joiner: Joiner,
}

impl MessageBoard {
    pub fn new(fetcher: Fetcher, sources: Sources) -> Self {
        Self {
            fetcher,
            sources,
            leg_delay_ms: None,
            joiner: Joiner::new(),
        }
    }

    /// Build from a full configuration, validating it first.
    pub fn from_config(config: &JoinConfig) -> Result<Self, BoardError> {
        validate_config(config).map_err(ConfigError::Validation)?;
        let sources = Sources::from_config(&config.sources)?;
        let fetcher = Fetcher::new(&config.fetch)?;

        let board = Self::new(fetcher, sources);
        Ok(match config.demo.leg_delay_ms {
            Some(range) => board.with_leg_delay(range),
            None => board,
        })
    }

    /// Delay the favorites leg by a random `[min, max]` milliseconds.
    ///
    /// Demo and test hook only.
    pub fn with_leg_delay(mut self, range_ms: (u64, u64)) -> Self {
        self.leg_delay_ms = Some(range_ms);
        self
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Start fetching both legs, cancelling any refresh still in flight.
    pub fn refresh(&self) -> InFlightJoin<(Vec<Message>, FavoriteSet)> {
        let delay = self.leg_delay();

        let fetcher = self.fetcher.clone();
        let url = self.sources.messages.clone();
        let messages = move || async move { fetcher.fetch_one(&url, Vec::<Message>::new()).await };

        let fetcher = self.fetcher.clone();
        let url = self.sources.favorites.clone();
        let favorites = move || async move {
            if let Some(delay) = delay {
                tracing::debug!(delay_ms = delay.as_millis() as u64, "Delaying favorites leg");
                tokio::time::sleep(delay).await;
            }
            fetcher.fetch_one(&url, FavoriteSet::new()).await
        };

        self.joiner.join_two(messages, favorites)
    }

    /// Refresh and wait for the combined snapshot.
    ///
    /// `None` only if a newer refresh or `cancel` superseded this one.
    pub async fn load(&self) -> Option<Snapshot> {
        let snapshot = self.refresh().wait().await.map(Snapshot::from)?;
        tracing::info!(
            messages = snapshot.messages.len(),
            favorites = snapshot.favorites.len(),
            "Snapshot ready"
        );
        Some(snapshot)
    }

    pub fn cancel(&self) -> bool {
        self.joiner.cancel()
    }

    pub fn state(&self) -> JoinState {
        self.joiner.state()
    }

    fn leg_delay(&self) -> Option<Duration> {
        let (min, max) = self.leg_delay_ms?;
        let ms = if min >= max {
            min
        } else {
            rand::thread_rng().gen_range(min..=max)
        };
        Some(Duration::from_millis(ms))
    }
}
