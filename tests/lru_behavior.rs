// ==============================================
// LRU BEHAVIOR TESTS (integration)
// ==============================================
//
// End-to-end recency and capacity behavior of LruCache through its public
// API, plus a model-based property test against a Vec kept in MRU-first
// order.

use proptest::prelude::*;
use ringcache::policy::lru::LruCache;

// ==============================================
// Recency
// ==============================================

#[test]
fn inserting_past_capacity_evicts_first_inserted() {
    let k = 4;
    let mut cache = LruCache::new(k);
    for i in 0..=k {
        cache.insert(i, i * 10);
    }
    assert_eq!(cache.len(), k);
    assert!(!cache.contains(&0));
    for i in 1..=k {
        assert!(cache.contains(&i));
    }
}

#[test]
fn get_refreshes_recency() {
    let mut cache = LruCache::new(2);
    cache.insert("a", 1);
    cache.insert("b", 2);
    cache.get(&"a");
    cache.insert("c", 3);

    assert!(cache.contains(&"a"));
    assert!(!cache.contains(&"b"));
    assert!(cache.contains(&"c"));
}

#[test]
fn peek_and_contains_do_not_refresh_recency() {
    let mut cache = LruCache::new(2);
    cache.insert("a", 1);
    cache.insert("b", 2);
    assert_eq!(cache.peek(&"a"), Some(&1));
    assert!(cache.contains(&"a"));
    cache.insert("c", 3);

    assert!(!cache.contains(&"a"));
    assert!(cache.contains(&"b"));
}

#[test]
fn scenario_from_two_slot_cache() {
    let mut cache = LruCache::new(2);
    cache.insert('x', 10);
    cache.insert('y', 20);
    assert_eq!(cache.get(&'x'), Some(&10));
    assert_eq!(cache.get(&'y'), Some(&20));

    cache.insert('z', 30);
    assert_eq!(cache.get(&'x'), None);
    assert_eq!(cache.get(&'y'), Some(&20));
    assert_eq!(cache.get(&'z'), Some(&30));
}

#[test]
fn correct_order_after_mixed_inserts_and_gets() {
    let mut cache = LruCache::new(3);
    cache.insert("a", 1);
    cache.insert("b", 2);
    cache.insert("c", 3);
    cache.get(&"b");
    cache.insert("d", 4);

    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(&2));
    assert_eq!(cache.get(&"c"), Some(&3));
    assert_eq!(cache.get(&"d"), Some(&4));
}

// ==============================================
// Capacity and removal
// ==============================================

#[test]
fn repeated_update_is_idempotent_on_len() {
    let mut cache = LruCache::new(3);
    cache.insert("k", "v1");
    cache.insert("k", "v2");
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&"k"), Some(&"v2"));
}

#[test]
fn resize_shrink_keeps_most_recent() {
    let mut cache = LruCache::new(3);
    cache.insert("a", 1);
    cache.insert("b", 2);
    cache.insert("c", 3);
    cache.resize(2);

    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(&2));
    assert_eq!(cache.get(&"c"), Some(&3));
}

#[test]
fn negative_capacity_is_rejected() {
    assert!(LruCache::<&str, i32>::try_new(-1).is_err());

    let mut cache = LruCache::new(2);
    cache.insert("a", 1);
    assert!(cache.try_resize(-10).is_err());
    assert_eq!(cache.capacity(), 2);
    assert_eq!(cache.peek(&"a"), Some(&1));
}

#[test]
fn clear_empties_fully() {
    let mut cache = LruCache::new(4);
    for key in ["a", "b", "c"] {
        cache.insert(key, key.len());
    }
    cache.clear();
    assert_eq!(cache.len(), 0);
    for key in ["a", "b", "c"] {
        assert_eq!(cache.get(&key), None);
    }
    assert_eq!(cache.keys().count(), 0);
}

#[test]
fn delete_does_not_resurrect() {
    let mut cache = LruCache::new(2);
    cache.insert("a", 1);
    assert!(!cache.delete(&"missing"));
    assert!(cache.delete(&"a"));
    assert_eq!(cache.get(&"a"), None);
    assert!(!cache.delete(&"a"));
}

#[test]
fn evict_removes_from_lru_side() {
    let mut cache = LruCache::new(5);
    for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
        cache.insert(key, i);
    }
    assert_eq!(cache.evict(2), 2);
    let remaining: Vec<_> = cache.keys().copied().collect();
    assert_eq!(remaining, vec!["d", "c"]);
    assert_eq!(cache.evict(0), 0);
    assert_eq!(cache.len(), 2);
}

#[test]
fn owned_string_keys() {
    let mut cache: LruCache<String, Vec<u8>> = LruCache::new(2);
    cache.insert("alpha".to_string(), vec![1]);
    cache.insert("beta".to_string(), vec![2]);
    cache.get(&"alpha".to_string());
    cache.insert("gamma".to_string(), vec![3]);

    assert!(!cache.contains(&"beta".to_string()));
    let keys: Vec<_> = cache.keys().cloned().collect();
    assert_eq!(keys, vec!["gamma".to_string(), "alpha".to_string()]);
}

// ==============================================
// Model-based property test
// ==============================================

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u32),
    Get(u8),
    Peek(u8),
    Remove(u8),
    Resize(usize),
    Evict(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..16, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        4 => (0u8..16).prop_map(Op::Get),
        2 => (0u8..16).prop_map(Op::Peek),
        2 => (0u8..16).prop_map(Op::Remove),
        1 => (0usize..10).prop_map(Op::Resize),
        1 => (0usize..4).prop_map(Op::Evict),
        1 => Just(Op::Clear),
    ]
}

// MRU-first reference model.
struct Model {
    entries: Vec<(u8, u32)>,
    capacity: usize,
}

impl Model {
    fn position(&self, key: u8) -> Option<usize> {
        self.entries.iter().position(|(k, _)| *k == key)
    }

    fn insert(&mut self, key: u8, value: u32) -> Option<u32> {
        if let Some(pos) = self.position(key) {
            let (_, old) = self.entries.remove(pos);
            self.entries.insert(0, (key, value));
            return Some(old);
        }
        if self.capacity == 0 {
            return None;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop();
        }
        self.entries.insert(0, (key, value));
        None
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }
}

proptest! {
    #[test]
    fn cache_matches_model(
        capacity in 0usize..8,
        ops in prop::collection::vec(op_strategy(), 0..150),
    ) {
        let mut cache = LruCache::new(capacity);
        let mut model = Model { entries: Vec::new(), capacity };

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(cache.insert(k, v), model.insert(k, v));
                },
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                },
                Op::Peek(k) => {
                    let expected = model.position(k).map(|pos| model.entries[pos].1);
                    prop_assert_eq!(cache.peek(&k).copied(), expected);
                },
                Op::Remove(k) => {
                    let expected = model.position(k).map(|pos| model.entries.remove(pos).1);
                    prop_assert_eq!(cache.remove(&k), expected);
                },
                Op::Resize(n) => {
                    cache.resize(n);
                    model.capacity = n;
                    model.entries.truncate(n);
                },
                Op::Evict(n) => {
                    let expected = n.min(model.entries.len());
                    prop_assert_eq!(cache.evict(n), expected);
                    let keep = model.entries.len() - expected;
                    model.entries.truncate(keep);
                },
                Op::Clear => {
                    cache.clear();
                    model.entries.clear();
                },
            }

            prop_assert!(cache.len() <= cache.capacity());
            prop_assert!(cache.check_invariants().is_ok());
            let actual: Vec<(u8, u32)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
            prop_assert_eq!(actual, model.entries.clone());
        }
    }

    #[test]
    fn len_never_exceeds_capacity(
        capacity in 0usize..16,
        keys in prop::collection::vec(any::<u16>(), 0..256),
    ) {
        let mut cache = LruCache::new(capacity);
        for key in keys {
            cache.insert(key, ());
            prop_assert!(cache.len() <= capacity);
        }
    }
}
