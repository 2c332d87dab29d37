#![no_main]

use libfuzzer_sys::fuzz_target;
use ringcache::ds::SentinelList;

// Fuzz arbitrary operation sequences on SentinelList
//
// Handles survive removal and clear, so stale ids keep getting replayed and
// must be rejected without touching live nodes.
fuzz_target!(|data: &[u8]| {
    let mut list: SentinelList<u32> = SentinelList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 12;
        let value = u32::from(pair[1]);
        let picked = if all_ids.is_empty() {
            None
        } else {
            Some(all_ids[(value as usize) % all_ids.len()])
        };

        match op {
            0 => {
                let id = list.push_front(value);
                all_ids.push(id);
                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.front_id(), Some(id));
            },
            1 => {
                let id = list.push_back(value);
                all_ids.push(id);
                assert_eq!(list.back(), Some(&value));
                assert_eq!(list.back_id(), Some(id));
            },
            2 => {
                let old_len = list.len();
                match list.pop_front() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            },
            3 => {
                let old_len = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            },
            4 => {
                if let Some(id) = picked {
                    if list.move_to_front(id) {
                        assert_eq!(list.front_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            },
            5 => {
                if let Some(id) = picked {
                    if list.move_to_back(id) {
                        assert_eq!(list.back_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            },
            6 => {
                if let Some(id) = picked {
                    let old_len = list.len();
                    if list.remove(id).is_some() {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                        assert!(list.get(id).is_none());
                    } else {
                        assert_eq!(list.len(), old_len);
                    }
                }
            },
            7 => {
                if let Some(id) = picked {
                    match list.insert_before(id, value) {
                        Some(new_id) => {
                            all_ids.push(new_id);
                            let ids: Vec<_> = list.iter_ids().collect();
                            let at = ids.iter().position(|other| *other == new_id);
                            assert_eq!(at.map(|pos| ids[pos + 1]), Some(id));
                        },
                        None => assert!(!list.contains(id)),
                    }
                }
            },
            8 => {
                if let Some(id) = picked {
                    match list.insert_after(id, value) {
                        Some(new_id) => {
                            all_ids.push(new_id);
                            let ids: Vec<_> = list.iter_ids().collect();
                            let at = ids.iter().position(|other| *other == id);
                            assert_eq!(at.map(|pos| ids[pos + 1]), Some(new_id));
                        },
                        None => assert!(!list.contains(id)),
                    }
                }
            },
            9 => {
                if let Some(found) = list.search(&value) {
                    assert_eq!(list.get(found), Some(&value));
                } else {
                    assert!(list.iter().all(|v| *v != value));
                }
            },
            10 => {
                let forward: Vec<u32> = list.iter().copied().collect();
                let mut backward: Vec<u32> = list.iter().rev().copied().collect();
                backward.reverse();
                assert_eq!(forward, backward);
                assert_eq!(forward.len(), list.len());
            },
            11 => {
                list.clear();
                assert!(list.is_empty());
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
                assert!(all_ids.iter().all(|id| !list.contains(*id)));
            },
            _ => unreachable!(),
        }

        assert!(list.check_invariants().is_ok());
    }
});
