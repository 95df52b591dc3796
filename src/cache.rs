//! # AppCache
//!
//! Bounded, thread-safe LRU cache meant to be built once and shared by every
//! caller in the process.
//!
//! ## Concurrency Model
//!
//! ```text
//!   Thread 1             Thread 2             Thread 3
//!      │                    │                    │
//!      │ try_get_value("a") │ add_or_update("b") │ count()
//!      ▼                    ▼                    ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │                  Mutex (the guard)                       │
//!   │                                                          │
//!   │  every operation, lookups included, takes it exclusively │
//!   │  lookups reorder recency, so a read lock cannot apply    │
//!   └──────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────────────┐
//!   │  LruCore<CacheKey, V>  (index + recency list, O(1) ops)  │
//!   └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys are validated before the guard is taken, so a rejected key never
//! contends for the lock and never changes state. Concurrent writers to the
//! same key serialize on the guard; whichever acquires it last wins.
//!
//! ## Sharing
//!
//! `AppCache` is a handle: cloning it is an `Arc` bump and every clone sees the
//! same entries. How the single instance is handed out (a `static`, a
//! dependency container, an explicit parameter) is up to the application.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::builder::AppCacheBuilder;
use crate::error::{CacheError, CacheResult, InvariantError};
use crate::key::CacheKey;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::lru::LruCore;
use crate::traits::{ConcurrentCache, SharedCache};

/// Thread-safe LRU cache keyed by non-empty strings.
///
/// # Example
///
/// ```
/// use appcache::AppCache;
///
/// let cache = AppCache::try_new(3).unwrap();
/// cache.add_or_update("1", 1).unwrap();
/// cache.add_or_update("2", 2).unwrap();
/// cache.add_or_update("3", 3).unwrap();
///
/// // A hit refreshes "1", so "2" is now the oldest entry.
/// assert_eq!(cache.try_get_value("1").as_deref(), Some(&1));
///
/// cache.add_or_update("4", 4).unwrap();
/// assert!(cache.try_get_value("2").is_none());
/// assert_eq!(cache.count(), 3);
/// ```
pub struct AppCache<V> {
    inner: Arc<Mutex<LruCore<CacheKey, V>>>,
    capacity: NonZeroUsize,
}

impl<V> AppCache<V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Fails with [`CacheError::InvalidCapacity`] when `capacity <= 0`. Storage
    /// grows on demand; use [`AppCacheBuilder`] to reserve it up front.
    ///
    /// ```
    /// use appcache::AppCache;
    /// use appcache::error::CacheError;
    ///
    /// assert!(AppCache::<u8>::try_new(1).is_ok());
    /// assert_eq!(
    ///     AppCache::<u8>::try_new(-8).unwrap_err(),
    ///     CacheError::InvalidCapacity { capacity: -8 }
    /// );
    /// ```
    pub fn try_new(capacity: i64) -> CacheResult<Self> {
        AppCacheBuilder::new(capacity)
            .prealloc_memory(false)
            .try_build()
    }

    /// Creates a cache from an already validated capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_config(capacity, false)
    }

    /// Returns a builder for the given capacity.
    pub fn builder(capacity: i64) -> AppCacheBuilder {
        AppCacheBuilder::new(capacity)
    }

    pub(crate) fn with_config(capacity: NonZeroUsize, prealloc: bool) -> Self {
        tracing::debug!(capacity = capacity.get(), prealloc, "constructed cache");
        Self {
            inner: Arc::new(Mutex::new(LruCore::with_prealloc(capacity, prealloc))),
            capacity,
        }
    }

    /// Number of entries, read under the guard.
    pub fn count(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum number of entries; fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Inserts `value` under `key`, or replaces the value already stored there.
    ///
    /// Either way the key becomes the most recently used entry. Inserting a new
    /// key into a full cache first evicts the least recently used entry.
    ///
    /// Fails with [`CacheError::InvalidKey`] for a missing or empty key; the
    /// cache is left untouched in that case.
    ///
    /// ```
    /// use appcache::AppCache;
    /// use appcache::error::CacheError;
    ///
    /// let cache = AppCache::try_new(2).unwrap();
    /// cache.add_or_update("k", 1).unwrap();
    /// cache.add_or_update(String::from("k"), 2).unwrap();
    /// assert_eq!(cache.count(), 1);
    ///
    /// assert_eq!(cache.add_or_update("", 3), Err(CacheError::InvalidKey));
    /// assert_eq!(cache.add_or_update(None::<&str>, 3), Err(CacheError::InvalidKey));
    /// assert_eq!(cache.count(), 1);
    /// ```
    pub fn add_or_update<Q>(&self, key: Q, value: V) -> CacheResult<()>
    where
        Q: TryInto<CacheKey, Error = CacheError>,
    {
        self.add_or_update_arc(key, Arc::new(value))
    }

    /// Like [`add_or_update`](Self::add_or_update) for a value that is already
    /// shared.
    pub fn add_or_update_arc<Q>(&self, key: Q, value: Arc<V>) -> CacheResult<()>
    where
        Q: TryInto<CacheKey, Error = CacheError>,
    {
        let key = key.try_into()?;
        self.insert_key(key, value);
        Ok(())
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the recency order as it was.
    pub fn try_get_value(&self, key: &str) -> Option<Arc<V>> {
        self.inner.lock().get(key).map(Arc::clone)
    }

    /// Returns the value for `key` without refreshing its recency.
    pub fn peek(&self, key: &str) -> Option<Arc<V>> {
        self.inner.lock().peek(key).map(Arc::clone)
    }

    /// Returns `true` if `key` is stored; does not refresh recency.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Returns the entry the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(CacheKey, Arc<V>)> {
        self.inner
            .lock()
            .peek_lru()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    /// Position of `key` in eviction order: 0 is evicted next.
    pub fn recency_rank(&self, key: &str) -> Option<usize> {
        self.inner.lock().recency_rank(key)
    }

    /// Snapshot of all keys from least to most recently used.
    pub fn keys_by_recency(&self) -> Vec<CacheKey> {
        self.inner.lock().keys_by_recency().cloned().collect()
    }

    /// Verifies the index and recency list agree; diagnostic use only.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }

    fn insert_key(&self, key: CacheKey, value: Arc<V>) {
        self.inner.lock().insert(key, value);
    }
}

#[cfg(feature = "metrics")]
impl<V> AppCache<V> {
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.inner.lock().metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<V> MetricsSnapshotProvider<CacheMetricsSnapshot> for AppCache<V> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<V> Clone for AppCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}

impl<V> fmt::Debug for AppCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCache")
            .field("count", &self.count())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<V> SharedCache<V> for AppCache<V> {
    fn count(&self) -> usize {
        AppCache::count(self)
    }

    fn capacity(&self) -> usize {
        AppCache::capacity(self)
    }

    fn add_or_update(&self, key: CacheKey, value: V) {
        self.insert_key(key, Arc::new(value));
    }

    fn try_get_value(&self, key: &str) -> Option<Arc<V>> {
        AppCache::try_get_value(self, key)
    }
}

impl<V: Send + Sync> ConcurrentCache for AppCache<V> {}
