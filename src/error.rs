//! Error types for the ringcache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache configuration parameter is
//!   invalid (e.g. a negative capacity handed to a fallible constructor).
//! - [`InvariantError`]: Returned by `check_invariants` when the sentinel
//!   ring or the map/list pairing of a cache is broken.
//!
//! ## Example Usage
//!
//! ```
//! use ringcache::error::ConfigError;
//! use ringcache::policy::lru::LruCache;
//!
//! // Capacity arriving from an untyped source
//! let cache: Result<LruCache<String, i32>, ConfigError> = LruCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Negative capacity is rejected without panicking
//! let bad = LruCache::<String, i32>::try_new(-1);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal list or cache invariants are violated.
///
/// Produced by [`SentinelList::check_invariants`](crate::ds::SentinelList::check_invariants)
/// and [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants).
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
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LruCache::try_new`](crate::policy::lru::LruCache::try_new)
/// and [`LruCache::try_resize`](crate::policy::lru::LruCache::try_resize).
/// A failed `try_resize` leaves the cache exactly as it was.
///
/// # Example
///
/// ```
/// use ringcache::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(-5).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
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

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
