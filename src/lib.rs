//! appcache: a bounded, thread-safe LRU cache shared across an application.
//!
//! [`AppCache`] stores values under non-empty string keys, evicts the least
//! recently used entry when full, and serializes every operation behind one
//! lock.
//!
//! ## Layout
//!
//! - [`cache`]: the shared [`AppCache`] handle, key validation and the guard.
//! - [`policy::lru`]: `LruCore`, a hash index plus recency list with O(1)
//!   insert, refresh and eviction.
//! - [`ds`]: the generational [`SlotArena`](ds::SlotArena) and the
//!   [`RecencyList`](ds::RecencyList) built on it.
//! - [`builder`], [`error`], [`key`], [`traits`]: configuration, error types,
//!   validated keys and the `SharedCache` interface.
//!
//! ```
//! use appcache::prelude::*;
//!
//! let cache: AppCache<String> = AppCache::try_new(2)?;
//! cache.add_or_update("a", "alpha".to_string())?;
//! cache.add_or_update("b", "beta".to_string())?;
//! cache.try_get_value("a");
//! cache.add_or_update("c", "gamma".to_string())?;
//!
//! assert!(cache.try_get_value("b").is_none());
//! # Ok::<(), CacheError>(())
//! ```

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod key;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;

pub use crate::cache::AppCache;
pub use crate::error::{CacheError, CacheResult};
pub use crate::key::CacheKey;
