//! Error types for the appcache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned when the caller hands the cache invalid input
//!   (a non-positive capacity at construction, a null or empty key on insert).
//! - [`InvariantError`]: Returned by
//!   [`AppCache::check_invariants`](crate::AppCache::check_invariants) when the
//!   index and the recency list disagree.
//!
//! A cache miss is not an error; lookups report it with `Option`.
//!
//! ## Example Usage
//!
//! ```
//! use appcache::error::CacheError;
//! use appcache::AppCache;
//!
//! let err = AppCache::<u32>::try_new(0).unwrap_err();
//! assert_eq!(err, CacheError::InvalidCapacity { capacity: 0 });
//!
//! let cache = AppCache::<u32>::try_new(4).unwrap();
//! assert_eq!(cache.add_or_update("", 1), Err(CacheError::InvalidKey));
//! assert_eq!(cache.count(), 0);
//! ```

use std::fmt;

/// Convenience alias for results produced by this crate.
pub type CacheResult<T> = Result<T, CacheError>;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned when caller input is rejected.
///
/// Both variants are raised before any state is touched, so a failed call
/// leaves the cache exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CacheError {
    /// The requested capacity was zero, negative, or too large for this
    /// platform's `usize`.
    InvalidCapacity { capacity: i64 },
    /// The key was missing or empty.
    InvalidKey,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "capacity must be between 1 and {} (got {capacity})",
                    usize::MAX
                )
            },
            CacheError::InvalidKey => f.write_str("cache key must not be null or empty"),
        }
    }
}

impl std::error::Error for CacheError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- CacheError -------------------------------------------------------

    #[test]
    fn invalid_capacity_display_names_value() {
        let err = CacheError::InvalidCapacity { capacity: -8 };
        assert_eq!(
            err.to_string(),
            format!("capacity must be between 1 and {} (got -8)", usize::MAX)
        );
    }

    #[test]
    fn invalid_key_display() {
        assert_eq!(
            CacheError::InvalidKey.to_string(),
            "cache key must not be null or empty"
        );
    }

    #[test]
    fn cache_error_clone_and_eq() {
        let a = CacheError::InvalidCapacity { capacity: 0 };
        assert_eq!(a.clone(), a);
        assert_ne!(a, CacheError::InvalidKey);
    }

    #[test]
    fn cache_error_result_alias_propagates() {
        fn parse(capacity: i64) -> CacheResult<usize> {
            if capacity <= 0 {
                return Err(CacheError::InvalidCapacity { capacity });
            }
            Ok(capacity as usize)
        }

        fn wrapped(capacity: i64) -> CacheResult<usize> {
            let value = parse(capacity)?;
            Ok(value * 2)
        }

        assert_eq!(wrapped(3), Ok(6));
        assert_eq!(
            wrapped(-1),
            Err(CacheError::InvalidCapacity { capacity: -1 })
        );
    }

    #[test]
    fn cache_error_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CacheError>();
    }

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/list length mismatch");
        assert_eq!(err.to_string(), "index/list length mismatch");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
