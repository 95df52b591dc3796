pub use crate::builder::{AppCacheBuilder, CacheConfig};
pub use crate::cache::AppCache;
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{CacheError, CacheResult, InvariantError};
pub use crate::key::CacheKey;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::lru::LruCore;
pub use crate::traits::{ConcurrentCache, SharedCache};
