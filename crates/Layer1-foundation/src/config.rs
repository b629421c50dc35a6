//! Browse configuration
//!
//! TTLs and endpoint settings for the directory browser. Defaults mirror the
//! public chess.com API and the freshness windows the browser was tuned for:
//! the roster changes rarely (long TTL), individual profiles change more
//! often (short TTL).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// Browser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    /// Base URL of the remote service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Title code of the fixed collection (e.g. "GM")
    #[serde(default = "default_title")]
    pub title: String,

    /// TTL for the cached roster (seconds)
    #[serde(default = "default_roster_ttl_secs")]
    pub roster_ttl_secs: u64,

    /// TTL for cached player profiles (seconds)
    #[serde(default = "default_profile_ttl_secs")]
    pub profile_ttl_secs: u64,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.chess.com/pub".to_string()
}
fn default_title() -> String {
    "GM".to_string()
}
fn default_roster_ttl_secs() -> u64 {
    600
} // 10 minutes
fn default_profile_ttl_secs() -> u64 {
    120
} // 2 minutes

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            title: default_title(),
            roster_ttl_secs: default_roster_ttl_secs(),
            profile_ttl_secs: default_profile_ttl_secs(),
        }
    }
}

impl BrowseConfig {
    /// Get roster TTL as Duration
    pub fn roster_ttl(&self) -> Duration {
        Duration::from_secs(self.roster_ttl_secs)
    }

    /// Get profile TTL as Duration
    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl_secs)
    }

    /// Parse a config from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrowseConfig::default();
        assert_eq!(config.roster_ttl(), Duration::from_secs(600));
        assert_eq!(config.profile_ttl(), Duration::from_secs(120));
        assert_eq!(config.title, "GM");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = BrowseConfig::from_toml_str("profile_ttl_secs = 30").unwrap();
        assert_eq!(config.profile_ttl_secs, 30);
        assert_eq!(config.roster_ttl_secs, 600);
        assert_eq!(config.base_url, "https://api.chess.com/pub");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = BrowseConfig::from_toml_str("roster_ttl_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
