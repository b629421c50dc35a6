//! Remote data source
//!
//! `DataSource` is the transport boundary: it performs single network calls
//! and returns typed records or a `FetchError`. No caching and no retry live
//! here; both are the cache layer's responsibility.

use crate::error::FetchError;
use crate::types::{PlayerProfile, TitledRoster};
use async_trait::async_trait;
use reqwest::Client;
use rookery_foundation::BrowseConfig;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote data source for the titled-player directory
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the full ordered roster of usernames
    async fn fetch_roster(&self) -> Result<Vec<String>, FetchError>;

    /// Fetch one player's detail record
    async fn fetch_profile(&self, username: &str) -> Result<PlayerProfile, FetchError>;
}

/// chess.com public API client
///
/// The API is unauthenticated; the client holds only a base URL and the
/// title code of the fixed collection it serves.
pub struct ChessComClient {
    client: Client,
    base_url: String,
    title: String,
}

impl ChessComClient {
    /// Create a client for the given endpoint and title code
    pub fn new(base_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            title: title.into(),
        }
    }

    /// Create a client from browse configuration
    pub fn from_config(config: &BrowseConfig) -> Self {
        Self::new(&config.base_url, &config.title)
    }

    /// Set custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        self
    }

    fn roster_url(&self) -> String {
        format!("{}/titled/{}", self.base_url, self.title)
    }

    fn profile_url(&self, username: &str) -> String {
        format!("{}/player/{}", self.base_url, username)
    }
}

#[async_trait]
impl DataSource for ChessComClient {
    async fn fetch_roster(&self) -> Result<Vec<String>, FetchError> {
        let url = self.roster_url();
        debug!(url = %url, "Fetching roster");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_http_status(status.as_u16(), &self.title));
        }

        let roster: TitledRoster = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!(count = roster.players.len(), "Fetched roster");
        Ok(roster.players)
    }

    async fn fetch_profile(&self, username: &str) -> Result<PlayerProfile, FetchError> {
        let url = self.profile_url(username);
        debug!(url = %url, "Fetching profile");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_http_status(status.as_u16(), username));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
