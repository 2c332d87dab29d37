//! ringcache: a fixed-capacity LRU cache on top of a sentinel-anchored,
//! arena-backed circular doubly linked list.
//!
//! - [`ds::SentinelList`]: the ring list, usable on its own.
//! - [`policy::lru::LruCache`]: the LRU policy layer.
//! - [`traits`]: capability traits shared by cache types.

pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
