//! # rookery-foundation
//!
//! Foundation layer for Rookery:
//! - Error: application-wide error type and `Result` alias
//! - Config: browse configuration (endpoint, TTLs)
//! - Time: unix-timestamp formatting helpers

pub mod config;
pub mod error;
pub mod time;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config
// ============================================================================
pub use config::BrowseConfig;

// ============================================================================
// Time
// ============================================================================
pub use time::{format_date, format_elapsed, now_unix};
