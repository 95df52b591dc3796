//! Validated cache keys.
//!
//! Every key that reaches the cache index goes through [`CacheKey`], which
//! rejects missing (`None`) and empty strings with [`CacheError::InvalidKey`].
//! The text is held in an `Arc<str>` so the index entry and its recency node
//! share one allocation.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::error::CacheError;

/// A non-empty cache key.
///
/// # Example
///
/// ```
/// use appcache::key::CacheKey;
/// use appcache::error::CacheError;
///
/// let key = CacheKey::try_from("user:42").unwrap();
/// assert_eq!(key.as_str(), "user:42");
///
/// assert_eq!(CacheKey::try_from(""), Err(CacheError::InvalidKey));
/// assert_eq!(CacheKey::try_from(None::<&str>), Err(CacheError::InvalidKey));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Arc<str>);

impl CacheKey {
    /// Validates `key` and wraps it.
    pub fn new(key: impl AsRef<str>) -> Result<Self, CacheError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }
        Ok(Self(Arc::from(key)))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CacheKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CacheKey {
    type Error = CacheError;

    fn try_from(key: &str) -> Result<Self, Self::Error> {
        Self::new(key)
    }
}

impl TryFrom<String> for CacheKey {
    type Error = CacheError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }
        Ok(Self(Arc::from(key)))
    }
}

impl TryFrom<&String> for CacheKey {
    type Error = CacheError;

    fn try_from(key: &String) -> Result<Self, Self::Error> {
        Self::new(key)
    }
}

impl TryFrom<Option<&str>> for CacheKey {
    type Error = CacheError;

    fn try_from(key: Option<&str>) -> Result<Self, Self::Error> {
        key.ok_or(CacheError::InvalidKey).and_then(Self::new)
    }
}

impl TryFrom<Option<String>> for CacheKey {
    type Error = CacheError;

    fn try_from(key: Option<String>) -> Result<Self, Self::Error> {
        key.ok_or(CacheError::InvalidKey).and_then(Self::try_from)
    }
}

impl TryFrom<&CacheKey> for CacheKey {
    type Error = CacheError;

    fn try_from(key: &CacheKey) -> Result<Self, Self::Error> {
        Ok(key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn accepts_non_empty_strings() {
        assert_eq!(CacheKey::try_from("a").unwrap().as_str(), "a");
        assert_eq!(
            CacheKey::try_from(String::from("owned")).unwrap().as_str(),
            "owned"
        );
        assert_eq!(CacheKey::try_from(Some("some")).unwrap().as_str(), "some");
    }

    #[test]
    fn rejects_null_and_empty() {
        assert_eq!(CacheKey::try_from(""), Err(CacheError::InvalidKey));
        assert_eq!(CacheKey::try_from(String::new()), Err(CacheError::InvalidKey));
        assert_eq!(CacheKey::try_from(None::<&str>), Err(CacheError::InvalidKey));
        assert_eq!(
            CacheKey::try_from(None::<String>),
            Err(CacheError::InvalidKey)
        );
        assert_eq!(CacheKey::try_from(Some("")), Err(CacheError::InvalidKey));
    }

    #[test]
    fn whitespace_is_a_valid_key() {
        assert!(CacheKey::try_from(" ").is_ok());
    }

    #[test]
    fn borrows_as_str_for_map_lookups() {
        let mut map = HashMap::new();
        map.insert(CacheKey::try_from("k").unwrap(), 1);
        assert_eq!(map.get("k"), Some(&1));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn clone_shares_allocation() {
        let key = CacheKey::try_from("shared").unwrap();
        let copy = key.clone();
        assert!(Arc::ptr_eq(&key.0, &copy.0));
        assert_eq!(format!("{key:?}"), "\"shared\"");
        assert_eq!(key.to_string(), "shared");
    }
}
