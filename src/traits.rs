//! # Cache Traits
//!
//! The thin interface the rest of an application programs against, kept apart
//! from the concrete [`AppCache`](crate::AppCache) so callers can depend on
//! `&dyn SharedCache<V>` and swap in test doubles.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            SharedCache<V>               │
//!   │                                         │
//!   │  count(&) → usize                       │
//!   │  capacity(&) → usize                    │
//!   │  add_or_update(&, CacheKey, V)          │
//!   │  try_get_value(&, &str) → Option<Arc<V>>│
//!   └────────────────────┬────────────────────┘
//!                        │
//!                        ▼
//!   ┌─────────────────────────────────────────┐
//!   │ ConcurrentCache: Send + Sync marker     │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! Every method takes `&self`: implementations synchronize internally, which is
//! what lets a single instance be shared by reference across threads.

use std::sync::Arc;

use crate::key::CacheKey;

/// Shared, internally synchronized key/value cache.
///
/// # Example
///
/// ```
/// use appcache::key::CacheKey;
/// use appcache::traits::SharedCache;
/// use appcache::AppCache;
///
/// fn warm(cache: &dyn SharedCache<u32>) {
///     for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
///         cache.add_or_update(CacheKey::try_from(key).unwrap(), i as u32);
///     }
/// }
///
/// let cache = AppCache::<u32>::try_new(2).unwrap();
/// warm(&cache);
/// assert_eq!(cache.count(), 2);
/// assert!(cache.try_get_value("a").is_none());
/// ```
pub trait SharedCache<V> {
    /// Number of entries currently stored.
    fn count(&self) -> usize;

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Inserts or replaces the value for `key` and marks it most recently used.
    fn add_or_update(&self, key: CacheKey, value: V);

    /// Returns the value for `key`, marking it most recently used on a hit.
    fn try_get_value(&self, key: &str) -> Option<Arc<V>>;
}

/// Marker for caches that are safe to share across threads.
pub trait ConcurrentCache: Send + Sync {}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Unbounded map used to check the trait stays object safe.
    #[derive(Default)]
    struct MapCache(Mutex<HashMap<CacheKey, Arc<i32>>>);

    impl SharedCache<i32> for MapCache {
        fn count(&self) -> usize {
            self.0.lock().len()
        }

        fn capacity(&self) -> usize {
            usize::MAX
        }

        fn add_or_update(&self, key: CacheKey, value: i32) {
            self.0.lock().insert(key, Arc::new(value));
        }

        fn try_get_value(&self, key: &str) -> Option<Arc<i32>> {
            self.0.lock().get(key).cloned()
        }
    }

    impl ConcurrentCache for MapCache {}

    #[test]
    fn trait_is_object_safe() {
        let cache: Box<dyn SharedCache<i32>> = Box::new(MapCache::default());
        cache.add_or_update(CacheKey::try_from("x").unwrap(), 7);
        assert_eq!(cache.count(), 1);
        assert_eq!(cache.try_get_value("x").map(|v| *v), Some(7));
        assert!(cache.try_get_value("y").is_none());
    }

    #[test]
    fn concurrent_marker_requires_send_sync() {
        fn assert_concurrent<C: ConcurrentCache>() {}
        assert_concurrent::<MapCache>();
    }
}
