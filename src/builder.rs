//! Cache configuration and builder.
//!
//! [`CacheConfig`] carries the construction parameters; [`AppCacheBuilder`]
//! validates them and produces an [`AppCache`]. Capacity is taken as a signed
//! integer so that zero and negative requests are rejected with
//! [`CacheError::InvalidCapacity`] instead of wrapping.
//!
//! ## Example
//!
//! ```rust
//! use appcache::builder::AppCacheBuilder;
//!
//! let cache = AppCacheBuilder::new(100)
//!     .prealloc_memory(false)
//!     .try_build::<String>()
//!     .unwrap();
//! cache.add_or_update("greeting", "hello".to_string()).unwrap();
//! assert_eq!(cache.capacity(), 100);
//! ```

use std::num::NonZeroUsize;

use crate::cache::AppCache;
use crate::error::{CacheError, CacheResult};

/// Construction parameters for an [`AppCache`].
///
/// | Field             | Default | Description                            |
/// |-------------------|---------|----------------------------------------|
/// | `capacity`        | 1000    | Maximum entries; must be > 0           |
/// | `prealloc_memory` | true    | Reserve index/list storage up front    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    pub capacity: i64,

    /// Pre-allocate memory for the full capacity.
    ///
    /// When true, index and recency list storage for up to
    /// [`PREALLOC_LIMIT`](crate::policy::lru::PREALLOC_LIMIT) entries is
    /// reserved at construction. When false, storage grows as needed.
    pub prealloc_memory: bool,
}

impl CacheConfig {
    /// Checks the configuration and returns the validated capacity.
    pub fn validate(&self) -> CacheResult<NonZeroUsize> {
        usize::try_from(self.capacity)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(CacheError::InvalidCapacity {
                capacity: self.capacity,
            })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            prealloc_memory: true,
        }
    }
}

/// Builder for [`AppCache`].
#[derive(Debug, Clone)]
pub struct AppCacheBuilder {
    config: CacheConfig,
}

impl AppCacheBuilder {
    /// Starts from the default configuration with the given capacity.
    pub fn new(capacity: i64) -> Self {
        Self {
            config: CacheConfig {
                capacity,
                ..CacheConfig::default()
            },
        }
    }

    pub fn from_config(config: CacheConfig) -> Self {
        Self { config }
    }

    pub fn prealloc_memory(mut self, prealloc: bool) -> Self {
        self.config.prealloc_memory = prealloc;
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Validates the configuration and builds the cache.
    pub fn try_build<V>(self) -> CacheResult<AppCache<V>> {
        let capacity = self.config.validate().inspect_err(|_| {
            tracing::warn!(
                capacity = self.config.capacity,
                "rejected cache construction: capacity out of range"
            );
        })?;
        Ok(AppCache::with_config(capacity, self.config.prealloc_memory))
    }
}
