//! # rookery-data
//!
//! Data layer for Rookery:
//! - Source: `DataSource` trait and the chess.com public API client
//! - Types: wire DTOs (`TitledRoster`, `PlayerProfile`)
//! - Cache: `RecordCache` (TTL + request coalescing + stale-while-revalidate)
//! - Error: `FetchError` taxonomy
//!
//! The transport (`DataSource`) performs single calls with no retry and no
//! caching; all freshness and deduplication policy lives in `RecordCache`.

pub mod cache;
pub mod error;
pub mod source;
pub mod types;

// ============================================================================
// Error
// ============================================================================
pub use error::FetchError;

// ============================================================================
// Source
// ============================================================================
pub use source::{ChessComClient, DataSource};

// ============================================================================
// Types
// ============================================================================
pub use types::{PlayerProfile, TitledRoster};

// ============================================================================
// Cache
// ============================================================================
pub use cache::{CacheStats, RecordCache};
