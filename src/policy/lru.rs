//! # Least Recently Used (LRU) Core
//!
//! Single-threaded index + recency order that backs [`AppCache`](crate::AppCache).
//! The core never synchronizes; the owning cache wraps it in one mutex so the two
//! structures below always change together.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                           LruCore<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, Entry<V>>  (index)                             │   │
//!   │   │                                                              │   │
//!   │   │  ┌─────────┬──────────────────────────────────────────┐      │   │
//!   │   │  │   Key   │  Entry { value: Arc<V>, order: SlotId }  │      │   │
//!   │   │  ├─────────┼──────────────────────────────────────────┤      │   │
//!   │   │  │  "a"    │  ───────────────────────────────────┐    │      │   │
//!   │   │  │  "b"    │  ─────────────────────────────┐     │    │      │   │
//!   │   │  │  "c"    │  ───────────────────────┐     │     │    │      │   │
//!   │   │  └─────────┴─────────────────────────┼─────┼─────┼────┘      │   │
//!   │   └──────────────────────────────────────┼─────┼─────┼───────────┘   │
//!   │                                          ▼     ▼     ▼               │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  RecencyList<K>  (order)                                     │   │
//!   │   │                                                              │   │
//!   │   │  front ──► ["c"] ◄──► ["b"] ◄──► ["a"] ◄── back              │   │
//!   │   │   (LRU)                                   (MRU)              │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   INSERT new key (cache full, capacity = 3)
//!   ═════════════════════════════════════════════════════════════════════
//!     front ──► [A] ◄──► [B] ◄──► [C] ◄── back
//!
//!     insert(D):
//!       1. pop [A] from the front, drop its index entry
//!       2. push [D] at the back, index it
//!
//!     front ──► [B] ◄──► [C] ◄──► [D] ◄── back
//!
//!   GET existing key
//!   ═════════════════════════════════════════════════════════════════════
//!     get(B):
//!       1. index lookup: O(1)
//!       2. move_to_back(entry.order): O(1)
//!
//!     front ──► [C] ◄──► [D] ◄──► [B] ◄── back
//!
//!   GET missing key / PEEK
//!   ═════════════════════════════════════════════════════════════════════
//!     Order unchanged.
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation         | Time     | Notes                                |
//! |-------------------|----------|--------------------------------------|
//! | `insert`          | O(1) avg | Index update + push/move at back     |
//! | `get`             | O(1) avg | Index lookup + move to back          |
//! | `peek`            | O(1) avg | Index lookup only                    |
//! | `pop_lru`         | O(1)     | Front pop + index remove             |
//! | `recency_rank`    | O(n)     | Walks the list from the front        |
//! | `check_invariants`| O(n)     | Full walk, diagnostics only          |
//!
//! ## Thread Safety
//!
//! `LruCore` is **not** synchronized. It is `Send` when `K` and `V` are, and
//! [`AppCache`](crate::AppCache) provides the lock.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};

/// Upper bound on entries reserved up front by [`LruCore::with_prealloc`].
///
/// Larger capacities reserve this much and grow on demand past it.
pub const PREALLOC_LIMIT: usize = 1 << 16;

/// Index entry: the owned value plus the handle of its recency node.
#[derive(Debug)]
struct Entry<V> {
    value: Arc<V>,
    order: SlotId,
}

/// Index + recency order with strict LRU eviction.
///
/// # Example
///
/// ```
/// use appcache::policy::lru::LruCore;
/// use std::num::NonZeroUsize;
/// use std::sync::Arc;
///
/// let mut core: LruCore<&str, i32> = LruCore::new(NonZeroUsize::new(2).unwrap());
/// core.insert("a", Arc::new(1));
/// core.insert("b", Arc::new(2));
///
/// // Touch "a" so "b" becomes the eviction candidate.
/// assert_eq!(core.get("a").map(|v| **v), Some(1));
///
/// core.insert("c", Arc::new(3));
/// assert!(!core.contains("b"));
/// assert_eq!(core.len(), 2);
/// ```
pub struct LruCore<K, V> {
    index: FxHashMap<K, Entry<V>>,
    order: RecencyList<K>,
    capacity: NonZeroUsize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an empty core that holds at most `capacity` entries.
    ///
    /// Index and list storage grow on demand.
    #[inline]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_prealloc(capacity, false)
    }

    /// Creates an empty core, reserving storage for up to
    /// `min(capacity, PREALLOC_LIMIT)` entries when `prealloc` is set.
    pub fn with_prealloc(capacity: NonZeroUsize, prealloc: bool) -> Self {
        let reserve = if prealloc {
            capacity.get().min(PREALLOC_LIMIT)
        } else {
            0
        };
        LruCore {
            index: FxHashMap::with_capacity_and_hasher(reserve, Default::default()),
            order: RecencyList::with_capacity(reserve),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Returns the previous value when the key was already present. Inserting a
    /// new key into a full core first evicts the least recently used entry.
    pub fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(entry) = self.index.get_mut(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = mem::replace(&mut entry.value, value);
            let moved = self.order.move_to_back(entry.order);
            debug_assert!(moved, "index entry held a stale recency handle");
            tracing::trace!(len = self.index.len(), "updated cache entry in place");

            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.index.len() >= self.capacity.get() {
            self.evict_lru();
        }

        let order = self.order.push_back(key.clone());
        self.index.insert(key, Entry { value, order });

        debug_assert!(self.index.len() <= self.capacity.get());
        debug_assert_eq!(self.index.len(), self.order.len());
        debug_assert_eq!(self.order.back_id(), Some(order));

        None
    }

    /// Looks up `key` and, on a hit, moves it to the most recently used slot.
    ///
    /// A miss leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(entry) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            tracing::trace!("cache lookup missed");
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_back(entry.order);
        tracing::trace!("cache lookup hit");
        Some(&entry.value)
    }

    /// Looks up `key` without touching the recency order.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|entry| &entry.value)
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, Arc<V>)> {
        let key = self.order.pop_front()?;
        let entry = self.index.remove(&key);
        debug_assert!(
            entry.is_some(),
            "recency list held a key missing from the index"
        );
        entry.map(|entry| (key, entry.value))
    }

    /// Returns the entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        let key = self.order.front()?;
        self.index.get(key).map(|entry| (key, &entry.value))
    }

    /// Distance of `key` from the eviction end: 0 is least recently used.
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.index.get(key)?;
        self.order.position(entry.order)
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Checks capacity, the index/list bijection and list link integrity.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() > self.capacity.get() {
            return Err(InvariantError::new(format!(
                "index holds {} entries over capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} entries but recency list holds {}",
                self.index.len(),
                self.order.len()
            )));
        }
        self.order.check_links()?;

        for id in self.order.iter_ids() {
            let key = self
                .order
                .get(id)
                .ok_or_else(|| InvariantError::new("recency list yielded a freed node"))?;
            match self.index.get(key) {
                Some(entry) if entry.order == id => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "index entry points at a different recency node",
                    ));
                },
                None => {
                    return Err(InvariantError::new(
                        "recency list holds a key missing from the index",
                    ));
                },
            }
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if self.pop_lru().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();

            tracing::debug!(
                capacity = self.capacity.get(),
                len = self.index.len(),
                "evicted least recently used cache entry"
            );
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot::capture(&self.metrics, self.index.len(), self.capacity.get())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for LruCore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, Arc<V>)> for LruCore<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, Arc<V>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
