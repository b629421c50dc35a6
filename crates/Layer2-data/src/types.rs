//! Wire types for the chess.com public API
//!
//! Optional profile fields are modeled as `Option<T>` so that an absent
//! field is distinguishable from an empty or zero value.

use serde::{Deserialize, Serialize};

/// Response shape of `/titled/{title}`: the full ordered roster of usernames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitledRoster {
    pub players: Vec<String>,
}

/// A single player's detail record from `/player/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Canonical API URL of this record
    #[serde(rename = "@id")]
    pub api_id: String,

    /// Public profile URL
    pub url: String,

    /// Username (matches the roster identifier)
    pub username: String,

    /// Numeric player id
    pub player_id: u64,

    /// Title code (e.g. "GM"), absent for untitled accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Account status (e.g. "premium", "basic", "closed")
    pub status: String,

    /// Display name, absent when the player never set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Free-form location string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Country API URL
    pub country: String,

    /// Account creation time (unix seconds)
    pub joined: i64,

    /// Last seen time (unix seconds)
    pub last_online: i64,

    /// Follower count
    pub followers: u64,

    /// Whether the player streams
    #[serde(default)]
    pub is_streamer: bool,

    /// Twitch channel URL, present only for streamers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitch_url: Option<String>,

    /// FIDE rating, absent when unrated or unlinked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fide: Option<u32>,
}

impl PlayerProfile {
    /// Human-facing name: the set display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}
