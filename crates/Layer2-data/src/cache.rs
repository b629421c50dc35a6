//! Record Cache
//!
//! Request-keyed, time-based staleness cache for remote records.
//!
//! # Behavior
//!
//! - **Fresh** entries (younger than the TTL) are returned directly.
//! - **Stale** entries are returned immediately while at most one background
//!   refresh runs; a failed refresh keeps the stale value in place and is
//!   never surfaced to the reader.
//! - **Absent** entries trigger a fetch. Concurrent readers of the same key
//!   share exactly one underlying fetch and receive the same result
//!   (request coalescing).
//! - `invalidate` marks an entry stale regardless of age without blocking.
//!   Invalidating a key whose fetch is still in flight queues another
//!   refresh once the in-flight one lands.
//!
//! Entries are never evicted for capacity reasons; the key space is bounded
//! by the collection size. An LRU cap would be a documented extension, not a
//! silent behavior change.
//!
//! # Example
//!
//! ```rust,ignore
//! let cache: RecordCache<Vec<String>> = RecordCache::new(Duration::from_secs(600));
//! let roster = cache.get("roster", || source.fetch_roster()).await?;
//! ```

use crate::error::FetchError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// A stored value with its fetch time
struct Stored<T> {
    value: T,
    fetched_at: Instant,
}

/// Cache slot for one key
struct Entry<T> {
    stored: Option<Stored<T>>,
    /// Present while a fetch for this key is in flight; coalesced waiters
    /// subscribe to it. At most one per key.
    inflight: Option<broadcast::Sender<Result<T, FetchError>>>,
    /// Set by `invalidate`; forces the next read to treat the entry as stale.
    invalidated: bool,
}

impl<T> Default for Entry<T> {
    fn default() -> Self {
        Self {
            stored: None,
            inflight: None,
            invalidated: false,
        }
    }
}

struct Inner<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<T>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Request-deduplicating TTL cache for remote records
///
/// Cheap to clone; clones share the same underlying store.
pub struct RecordCache<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for RecordCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> RecordCache<T> {
    /// Create a cache whose entries go stale after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                ttl,
                entries: Mutex::new(HashMap::new()),
                hits: AtomicU64::new(0),
                misses: AtomicU64::new(0),
            }),
        }
    }

    /// Read a record through the cache.
    ///
    /// `fetcher` is invoked at most once per call, and only when this call
    /// actually starts a fetch (initial load or background refresh).
    ///
    /// Returns an error only when there is no cached value at all and the
    /// underlying fetch fails.
    pub async fn get<F, Fut>(&self, key: &str, fetcher: F) -> Result<T, FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let mut rx = {
            let mut entries = self.inner.entries.lock();
            let entry = entries.entry(key.to_string()).or_default();

            if let Some(stored) = &entry.stored {
                let fresh = !entry.invalidated && stored.fetched_at.elapsed() <= self.inner.ttl;
                let value = stored.value.clone();
                self.inner.hits.fetch_add(1, Ordering::Relaxed);

                if !fresh && entry.inflight.is_none() {
                    // Stale: serve what we have, refresh behind the reader's
                    // back. The in-flight marker guarantees a single refresh
                    // no matter how many stale reads race it.
                    let (tx, _) = broadcast::channel(1);
                    entry.inflight = Some(tx.clone());
                    entry.invalidated = false;
                    self.spawn_fetch(key.to_string(), fetcher(), tx);
                }
                return Ok(value);
            }

            self.inner.misses.fetch_add(1, Ordering::Relaxed);
            match &entry.inflight {
                // Coalesce: someone else's fetch is already running
                Some(tx) => tx.subscribe(),
                None => {
                    let (tx, rx) = broadcast::channel(1);
                    entry.inflight = Some(tx.clone());
                    self.spawn_fetch(key.to_string(), fetcher(), tx);
                    rx
                }
            }
        };

        match rx.recv().await {
            Ok(result) => result,
            // The fetch task never drops its sender before sending, so this
            // only fires if the runtime is shutting down.
            Err(_) => Err(FetchError::Network(
                "coalesced fetch interrupted".to_string(),
            )),
        }
    }

    /// Mark an entry stale regardless of age.
    ///
    /// Does not block and does not fetch; the next `get` serves the stale
    /// value and triggers a background refresh.
    pub fn invalidate(&self, key: &str) {
        let mut entries = self.inner.entries.lock();
        if let Some(entry) = entries.get_mut(key) {
            if entry.stored.is_some() || entry.inflight.is_some() {
                entry.invalidated = true;
                debug!(key, "Invalidated cache entry");
            }
        }
    }

    /// Mark every entry stale
    pub fn invalidate_all(&self) {
        let mut entries = self.inner.entries.lock();
        for entry in entries.values_mut() {
            if entry.stored.is_some() || entry.inflight.is_some() {
                entry.invalidated = true;
            }
        }
    }

    /// Fire-and-forget `get` to warm the cache ahead of navigation.
    ///
    /// Errors are swallowed (logged at debug).
    pub fn prefetch<F, Fut>(&self, key: &str, fetcher: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let cache = self.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            if let Err(e) = cache.get(&key, fetcher).await {
                debug!(key = %key, error = %e, "Prefetch failed");
            }
        });
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.inner.entries.lock();
        let hits = self.inner.hits.load(Ordering::Relaxed);
        let misses = self.inner.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            entries: entries.values().filter(|e| e.stored.is_some()).count(),
            hits,
            misses,
            hit_rate,
        }
    }

    /// Run the fetch to completion on the runtime, settle the entry, and
    /// deliver the result to every coalesced waiter.
    ///
    /// The fetch is not cancelled when callers lose interest.
    fn spawn_fetch<Fut>(
        &self,
        key: String,
        fut: Fut,
        tx: broadcast::Sender<Result<T, FetchError>>,
    ) where
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = fut.await;

            let mut entries = inner.entries.lock();
            if let Some(entry) = entries.get_mut(&key) {
                entry.inflight = None;
                match &result {
                    Ok(value) => {
                        entry.stored = Some(Stored {
                            value: value.clone(),
                            fetched_at: Instant::now(),
                        });
                        // `invalidated` is deliberately left untouched: an
                        // invalidate that raced this fetch queues another
                        // refresh on the next read.
                    }
                    Err(e) => {
                        if entry.stored.is_some() {
                            warn!(key = %key, error = %e, "Background refresh failed; keeping stale value");
                        } else {
                            debug!(key = %key, error = %e, "Fetch failed");
                        }
                    }
                }
            }
            // Send while the lock is held: a new reader either subscribed in
            // time to receive this, or takes the lock after and sees the
            // settled entry.
            let _ = tx.send(result);
        });
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
