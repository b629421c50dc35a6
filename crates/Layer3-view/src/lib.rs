//! # rookery-view
//!
//! View layer for Rookery:
//! - Search: case-insensitive substring filter over the roster
//! - Pagination: pure page-slice math with totals
//! - State: `ViewState` ⇄ location-descriptor codec (sparse encoding)
//! - Controller: composition layer with a subscribe contract
//!
//! Data flow: `RecordCache` → search filter → pagination → snapshot. The
//! codec mediates between the location descriptor and the controller's
//! state in both directions.

pub mod controller;
pub mod pagination;
pub mod search;
pub mod state;

// ============================================================================
// Search
// ============================================================================
pub use search::filter_keys;

// ============================================================================
// Pagination
// ============================================================================
pub use pagination::{paginate, PageResult};

// ============================================================================
// State
// ============================================================================
pub use state::{snap_page_size, DetailReturn, ViewState, DEFAULT_PAGE_SIZE, PAGE_SIZES};

// ============================================================================
// Controller
// ============================================================================
pub use controller::{ListSnapshot, ViewController};
