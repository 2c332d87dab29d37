use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ringcache::ds::{NodeId, SentinelList};

fn filled(n: u64) -> (SentinelList<u64>, Vec<NodeId>) {
    let mut list = SentinelList::with_capacity(n as usize);
    let ids = (0..n).map(|i| list.push_back(i)).collect();
    (list, ids)
}

fn bench_push_pop_both_ends(c: &mut Criterion) {
    c.bench_function("sentinel_list_push_pop", |b| {
        b.iter(|| {
            let mut list = SentinelList::with_capacity(1024);
            for i in 0..512u64 {
                list.push_back(std::hint::black_box(i));
                list.push_front(std::hint::black_box(i));
            }
            while let Some(v) = list.pop_back() {
                std::hint::black_box(v);
                if let Some(v) = list.pop_front() {
                    std::hint::black_box(v);
                }
            }
        })
    });
}

fn bench_move_to_front(c: &mut Criterion) {
    c.bench_function("sentinel_list_move_to_front", |b| {
        b.iter_batched(
            || filled(4096),
            |(mut list, ids)| {
                for id in ids.iter().rev() {
                    std::hint::black_box(list.move_to_front(*id));
                }
                list
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_middle(c: &mut Criterion) {
    c.bench_function("sentinel_list_remove_every_other", |b| {
        b.iter_batched(
            || filled(4096),
            |(mut list, ids)| {
                for id in ids.iter().step_by(2) {
                    std::hint::black_box(list.remove(*id));
                }
                list
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iter(c: &mut Criterion) {
    let (list, _) = filled(4096);
    c.bench_function("sentinel_list_iter_sum", |b| {
        b.iter(|| std::hint::black_box(list.iter().sum::<u64>()))
    });
}

fn bench_clear(c: &mut Criterion) {
    c.bench_function("sentinel_list_clear", |b| {
        b.iter_batched(
            || filled(4096),
            |(mut list, _)| {
                list.clear();
                list
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_push_pop_both_ends,
    bench_move_to_front,
    bench_remove_middle,
    bench_iter,
    bench_clear
);
criterion_main!(benches);
