//! View controller
//!
//! Composition layer: wires the record caches through the search filter and
//! pagination engine, keeps `ViewState` in sync with the location
//! descriptor, and publishes snapshots over a watch channel so presentation
//! layers can subscribe instead of polling.
//!
//! Every state-affecting action funnels through one reconciliation pass:
//! whenever the filtered item count shrinks below the current page, the page
//! snaps back to 1. A single pass (rather than per-action corrections)
//! avoids order-dependent double-corrections when several triggers fire in
//! the same update.

use crate::pagination::{paginate, PageResult};
use crate::search::filter_keys;
use crate::state::{snap_page_size, DetailReturn, ViewState};
use rookery_data::{DataSource, FetchError, PlayerProfile, RecordCache};
use rookery_foundation::BrowseConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Cache key of the single roster entry
const ROSTER_KEY: &str = "roster";

/// What the presentation layer renders: the current page of the filtered
/// roster plus pagination metadata and the state that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListSnapshot {
    /// Identifiers on the current page
    pub items: Vec<String>,
    /// State this snapshot was derived from
    pub state: ViewState,
    /// Filtered item count
    pub total_items: usize,
    /// Total pages of the filtered list
    pub total_pages: usize,
    /// 1-based index of the first shown item
    pub start_index: usize,
    /// 1-based index of the last shown item
    pub end_index: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Directory browser controller
///
/// Owns the caches and the current `ViewState`. All mutation happens through
/// the action methods; each one re-derives and publishes a fresh snapshot.
pub struct ViewController {
    source: Arc<dyn DataSource>,
    roster_cache: RecordCache<Vec<String>>,
    profile_cache: RecordCache<PlayerProfile>,
    /// Last roster observed through the cache
    roster: Vec<String>,
    state: ViewState,
    snapshot_tx: watch::Sender<ListSnapshot>,
}

impl ViewController {
    /// Create a controller over the given data source
    pub fn new(source: Arc<dyn DataSource>, config: &BrowseConfig) -> Self {
        let (snapshot_tx, _) = watch::channel(ListSnapshot::default());
        Self {
            source,
            roster_cache: RecordCache::new(config.roster_ttl()),
            profile_cache: RecordCache::new(config.profile_ttl()),
            roster: Vec::new(),
            state: ViewState::default(),
            snapshot_tx,
        }
    }

    /// Subscribe to snapshot changes.
    ///
    /// The receiver always holds the latest snapshot; presentation layers
    /// may await changes or just borrow the current value.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current view state
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Load the roster through the cache.
    ///
    /// Serves a stale roster immediately when one exists; a first-load
    /// failure surfaces as a retryable error.
    pub async fn load(&mut self) -> Result<(), FetchError> {
        let source = Arc::clone(&self.source);
        self.roster = self
            .roster_cache
            .get(ROSTER_KEY, move || async move { source.fetch_roster().await })
            .await?;
        self.reconcile_and_publish();
        Ok(())
    }

    /// Derive the current snapshot: filter, then paginate.
    pub fn snapshot(&self) -> ListSnapshot {
        let filtered = filter_keys(&self.roster, &self.state.search);
        let PageResult {
            items,
            total_pages,
            total_items,
            start_index,
            end_index,
            has_next_page,
            has_previous_page,
        } = paginate(&filtered, self.state.page, self.state.page_size);

        ListSnapshot {
            items,
            state: self.state.clone(),
            total_items,
            total_pages,
            start_index,
            end_index,
            has_next_page,
            has_previous_page,
        }
    }

    // ========================================================================
    // User actions
    // ========================================================================

    /// Change the search text. A new query invalidates the old page
    /// position, so the page resets to 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.search = text.into();
        self.state.page = 1;
        self.reconcile_and_publish();
    }

    /// Go to page `n`. No-op unless `1 <= n <= total_pages` for the current
    /// filtered view.
    pub fn set_page(&mut self, n: u32) {
        let total_pages = self.current_total_pages();
        if n < 1 || (n as usize) > total_pages {
            debug!(page = n, total_pages, "Ignoring out-of-range page change");
            return;
        }
        self.state.page = n;
        self.reconcile_and_publish();
    }

    /// Change the page size (snapped into the allowed set); resets to page 1.
    pub fn set_page_size(&mut self, n: u32) {
        self.state.page_size = snap_page_size(n as i64);
        self.state.page = 1;
        self.reconcile_and_publish();
    }

    /// Invalidate the cached roster so the next `load` refreshes it.
    pub fn refresh(&self) {
        self.roster_cache.invalidate(ROSTER_KEY);
    }

    /// Invalidate everything this controller has cached (roster and all
    /// profiles). Reads keep serving stale values while refreshes run.
    pub fn invalidate_all(&self) {
        self.roster_cache.invalidate_all();
        self.profile_cache.invalidate_all();
    }

    // ========================================================================
    // Detail records
    // ========================================================================

    /// Read one player's profile through the cache.
    pub async fn profile(&self, username: &str) -> Result<PlayerProfile, FetchError> {
        let source = Arc::clone(&self.source);
        let username_owned = username.to_string();
        self.profile_cache
            .get(username, move || async move {
                source.fetch_profile(&username_owned).await
            })
            .await
    }

    /// Warm the profile cache for an anticipated detail navigation.
    /// Never blocks, never surfaces errors.
    pub fn prefetch_profile(&self, username: &str) {
        let source = Arc::clone(&self.source);
        let username_owned = username.to_string();
        self.profile_cache.prefetch(username, move || async move {
            source.fetch_profile(&username_owned).await
        });
    }

    // ========================================================================
    // Location descriptor
    // ========================================================================

    /// React to an external navigation event: re-derive the view state from
    /// the location descriptor.
    pub fn apply_location(&mut self, params: &BTreeMap<String, String>) {
        self.state = ViewState::decode(params);
        self.reconcile_and_publish();
    }

    /// Encode the current view state as a location descriptor.
    pub fn location(&self) -> BTreeMap<String, String> {
        self.state.encode()
    }

    /// Capture back-navigation state for entering a detail view.
    pub fn detail_return(&self) -> DetailReturn {
        DetailReturn::from_view_state(&self.state)
    }

    /// Restore the list view recorded by a detail-view descriptor.
    pub fn return_from_detail(&mut self, ret: &DetailReturn) {
        self.state = ret.to_view_state(self.state.page_size);
        self.reconcile_and_publish();
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    fn current_total_pages(&self) -> usize {
        let filtered = filter_keys(&self.roster, &self.state.search);
        paginate::<String>(&filtered, 1, self.state.page_size).total_pages
    }

    /// The single correction pass that runs after any state-affecting
    /// action: if the filtered list shrank below the current page, snap back
    /// to page 1. Then publish.
    fn reconcile_and_publish(&mut self) {
        let total_pages = self.current_total_pages();
        if total_pages > 0 && (self.state.page as usize) > total_pages {
            debug!(
                page = self.state.page,
                total_pages, "Correcting out-of-range page back to 1"
            );
            self.state.page = 1;
        }
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
