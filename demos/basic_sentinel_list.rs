use ringcache::ds::SentinelList;

fn main() {
    let mut list = SentinelList::new();

    let b = list.push_back("b");
    list.push_back("c");
    list.push_front("a");

    let d = list.insert_after(b, "b2").unwrap_or(b);
    list.move_to_back(d);

    println!("forward: {:?}", list.iter().collect::<Vec<_>>());
    println!("backward: {:?}", list.iter().rev().collect::<Vec<_>>());

    list.remove(b);
    println!("after remove: {:?}", list);
    println!("stale handle still valid? {}", list.contains(b));

    list.clear();
    println!("len after clear: {}", list.len());
}

// Expected output:
// forward: ["a", "b", "c", "b2"]
// backward: ["b2", "c", "b", "a"]
// after remove: ["a", "c", "b2"]
// stale handle still valid? false
// len after clear: 0
