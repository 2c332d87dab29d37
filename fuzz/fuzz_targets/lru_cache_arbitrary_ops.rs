#![no_main]

use libfuzzer_sys::fuzz_target;
use ringcache::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// The first byte picks the capacity; the rest are (op, key) pairs over a
// small key space so updates, hits and evictions all happen often.
fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };

    let mut cache: LruCache<u8, u32> = LruCache::new(usize::from(first % 16));

    for (step, pair) in rest.chunks_exact(2).enumerate() {
        let op = pair[0] % 9;
        let key = pair[1] % 32;
        let value = step as u32;

        match op {
            0 | 1 => {
                let existed = cache.contains(&key);
                let old = cache.insert(key, value);
                assert_eq!(old.is_some(), existed);
                if cache.capacity() > 0 {
                    assert_eq!(cache.peek_mru(), Some((&key, &value)));
                } else {
                    assert!(cache.is_empty());
                }
            },
            2 => {
                if let Some(found) = cache.get(&key).copied() {
                    assert_eq!(cache.peek_mru(), Some((&key, &found)));
                }
            },
            3 => {
                let peeked = cache.peek(&key).copied();
                assert_eq!(peeked.is_some(), cache.contains(&key));
            },
            4 => {
                let existed = cache.contains(&key);
                assert_eq!(cache.delete(&key), existed);
                assert!(!cache.contains(&key));
            },
            5 => {
                let old_len = cache.len();
                let evicted = cache.evict(usize::from(key % 4));
                assert_eq!(evicted, usize::from(key % 4).min(old_len));
                assert_eq!(cache.len(), old_len - evicted);
            },
            6 => {
                cache.resize(usize::from(key % 16));
                assert!(cache.len() <= cache.capacity());
            },
            7 => {
                let lru = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), lru);
            },
            8 => {
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.keys().count(), 0);
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        assert!(cache.check_invariants().is_ok());
    }
});
