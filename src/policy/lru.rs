//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key-value cache that evicts the least recently accessed
//! entry once the capacity bound is reached. Every operation is O(1) except
//! the `recency_rank` scan and the iteration views.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, NodeId>   (non-owning handles into the list)   │   │
//!   │   │                                                              │   │
//!   │   │   key_a ──────────────┐                                      │   │
//!   │   │   key_b ──────────────┼──────────┐                           │   │
//!   │   │   key_c ──────────────┼──────────┼──────────┐                │   │
//!   │   └───────────────────────┼──────────┼──────────┼────────────────┘   │
//!   │                           ▼          ▼          ▼                    │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  SentinelList<Entry<K, V>>   (owns keys and values)          │   │
//!   │   │                                                              │   │
//!   │   │  [sentinel] ◄──► [a] ◄──► [b] ◄──► [c] ◄──► [sentinel]       │   │
//!   │   │                  MRU                LRU                      │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   INSERT new key (cache full, capacity = 3)
//!     before: [A] ◄──► [B] ◄──► [C]
//!     1. pop_back()  → C, unmap C
//!     2. push_front(D), map D
//!     after:  [D] ◄──► [A] ◄──► [B]
//!
//!   GET existing key
//!     before: [A] ◄──► [B] ◄──► [C]
//!     get(B): map lookup, move_to_front(B)
//!     after:  [B] ◄──► [A] ◄──► [C]
//!
//!   PEEK / CONTAINS
//!     map lookup only, order unchanged
//! ```
//!
//! The map and the list always hold the same set of keys: every path that
//! removes a node also removes its key, and vice versa.
//!
//! ## Iteration Order
//!
//! `keys()`, `values()` and `iter()` walk the recency list, most recently
//! used first. All three are double-ended, so `.rev()` walks from the next
//! eviction candidate upwards.
//!
//! ## Example
//!
//! ```
//! use ringcache::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.insert("x", 10);
//! cache.insert("y", 20);
//! assert_eq!(cache.get(&"x"), Some(&10));
//!
//! // "y" is now least recently used
//! cache.insert("z", 30);
//! assert!(!cache.contains(&"y"));
//! assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!["z", "x"]);
//! ```

use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::sentinel_list::{self, NodeId, SentinelList};
use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};

// The key lives here too so eviction from the tail can unmap it.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache.
///
/// Keys are cloned once on insert: one copy indexes the map, the other rides
/// in the list entry.
pub struct LruCache<K, V> {
    map: FxHashMap<K, NodeId>,
    list: SentinelList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of 0 is allowed; such a cache retains nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            list: SentinelList::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Creates a cache from a signed capacity, rejecting negative values.
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        Ok(Self::new(checked_capacity(capacity)?))
    }

    /// Returns the number of cached entries.
    #[inline]
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the maximum number of entries.
    #[inline]
    #[doc(alias = "max")]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `key` is cached. Does not update recency.
    #[inline]
    #[doc(alias = "has")]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Updating an existing key replaces its value in place and returns the
    /// previous value. Inserting a new key into a full cache first evicts the
    /// least recently used entry, so `len() <= capacity()` always holds.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// assert_eq!(cache.insert("a", 1), None);
    /// assert_eq!(cache.insert("a", 2), Some(1));
    /// assert_eq!(cache.len(), 1);
    /// ```
    #[doc(alias = "set")]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = self
                .list
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
            self.list.move_to_front(id);

            self.debug_validate_invariants();
            return previous;
        }

        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.map.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            self.evict_lru_entry();
        }

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, id);

        self.debug_validate_invariants();
        None
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// cache.get(&"a");
    ///
    /// // "b" is evicted, not "a"
    /// cache.insert("c", 3);
    /// assert!(cache.contains(&"a"));
    /// assert!(!cache.contains(&"b"));
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.map.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value for `key` and marks it most
    /// recently used.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = match self.map.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Returns the value for `key` without touching recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = *self.map.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_hit();

        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the most recently used entry without touching recency order.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.map.remove(key)?;
        let entry = self.list.remove(id);

        self.debug_validate_invariants();
        entry.map(|entry| entry.value)
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }

    /// Drops every entry.
    ///
    /// The capacity is not reset to 0: the cache accepts inserts right after
    /// `clear` with the same bound as before.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.list.clear();
        self.map.clear();
    }

    /// Sets a new capacity, evicting least recently used entries until the
    /// cache fits.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(3);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// cache.insert("c", 3);
    ///
    /// cache.resize(2);
    /// assert!(!cache.contains(&"a"));
    /// assert_eq!(cache.len(), 2);
    /// ```
    pub fn resize(&mut self, capacity: usize) -> &mut Self {
        #[cfg(feature = "metrics")]
        self.metrics.record_resize_call();

        self.capacity = capacity;
        if self.map.len() > capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();
            while self.map.len() > capacity && self.evict_lru_entry() {}
        }

        self.debug_validate_invariants();
        self
    }

    /// Like [`resize`](Self::resize), but takes a signed capacity.
    ///
    /// A negative capacity returns [`ConfigError`] and leaves the cache
    /// untouched.
    pub fn try_resize(&mut self, capacity: i64) -> Result<&mut Self, ConfigError> {
        let capacity = checked_capacity(capacity)?;
        Ok(self.resize(capacity))
    }

    /// Evicts up to `count` least recently used entries and returns how many
    /// were removed. Stops early once the cache is empty; `evict(0)` does
    /// nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use ringcache::policy::lru::LruCache;
    ///
    /// let mut cache = LruCache::new(5);
    /// for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
    ///     cache.insert(key, i);
    /// }
    ///
    /// assert_eq!(cache.evict(2), 2);
    /// assert!(!cache.contains(&"a"));
    /// assert!(!cache.contains(&"b"));
    /// assert_eq!(cache.evict(10), 2);
    /// assert!(cache.is_empty());
    /// ```
    pub fn evict(&mut self, count: usize) -> usize {
        if count == 0 || self.map.is_empty() {
            return 0;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        let mut evicted = 0;
        while evicted < count && self.evict_lru_entry() {
            evicted += 1;
        }

        self.debug_validate_invariants();
        evicted
    }

    /// Returns an iterator over keys, most recently used first.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: self.list.iter(),
        }
    }

    /// Returns an iterator over values, most recently used first.
    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            inner: self.list.iter(),
        }
    }

    /// Returns an iterator over `(&K, &V)` pairs, most recently used first.
    #[doc(alias = "entries")]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Checks that the map and the recency list describe the same entries
    /// and that the list's ring is intact.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys but list holds {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        for (id, entry) in self.list.iter_entries() {
            if self.map.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(
                    "list entry is not indexed by its key in the map",
                ));
            }
        }
        Ok(())
    }

    // Pops the tail entry and unmaps its key.
    fn pop_tail(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.map.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    fn evict_lru_entry(&mut self) -> bool {
        let evicted = self.pop_tail().is_some();

        #[cfg(feature = "metrics")]
        if evicted {
            self.metrics.record_evicted_entry();
        }

        evicted
    }

    #[inline]
    fn debug_validate_invariants(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.check_invariants() {
                panic!("LruCache invariant violated: {}", err);
            }
        }
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.pop_tail();

        #[cfg(feature = "metrics")]
        if popped.is_some() {
            self.metrics.record_pop_lru_found();
        }

        self.debug_validate_invariants();
        popped
    }

    /// Returns the next eviction candidate without touching recency order.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let entry = self.list.back()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    /// Marks `key` most recently used; returns `false` if it is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.map.get(key) else {
            return false;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        self.list.move_to_front(id)
    }

    /// Position of `key` in recency order, 0 being most recently used.
    ///
    /// Walks the list, so this is O(n).
    pub fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let target = *self.map.get(key)?;
        let rank = self.list.iter_ids().position(|id| {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();
            id == target
        });

        #[cfg(feature = "metrics")]
        if rank.is_some() {
            self.metrics.record_recency_rank_found();
        }

        rank
    }
}

fn checked_capacity(capacity: i64) -> Result<usize, ConfigError> {
    usize::try_from(capacity).map_err(|_| {
        ConfigError::new(format!(
            "capacity must be a non-negative integer, got {}",
            capacity
        ))
    })
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Returns a copy of the recorded counters plus current size gauges.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            clear_calls: self.metrics.clear_calls,
            resize_calls: self.metrics.resize_calls,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_hits: self.metrics.peek_hits.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.map.len(),
            capacity: self.capacity,
        }
    }

    /// Zeroes every counter.
    pub fn reset_metrics(&mut self) {
        self.metrics = LruMetrics::default();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}

impl<K, V> Default for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// An empty cache with capacity 0; call [`resize`](LruCache::resize)
    /// before use.
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entries<'a, K, V>(&'a SentinelList<Entry<K, V>>);

        impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entries<'_, K, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(self.0.iter().map(|entry| (&entry.key, &entry.value)))
                    .finish()
            }
        }

        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.len())
            .field("entries", &Entries(&self.list))
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache keys, most recently used first.
pub struct Keys<'a, K, V> {
    inner: sentinel_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over cache values, most recently used first.
pub struct Values<'a, K, V> {
    inner: sentinel_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| &entry.value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// Iterator over `(&K, &V)` pairs, most recently used first.
pub struct Iter<'a, K, V> {
    inner: sentinel_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}
