use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Zipf};
use ringcache::policy::lru::LruCache;

fn filled(capacity: u64) -> LruCache<u64, u64> {
    let mut cache = LruCache::new(capacity as usize);
    for i in 0..capacity {
        cache.insert(i, i);
    }
    cache
}

fn bench_lru_insert_get(c: &mut Criterion) {
    c.bench_function("lru_insert_get", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_pop_lru(c: &mut Criterion) {
    c.bench_function("lru_pop_lru", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for _ in 0..1024u64 {
                    let _ = std::hint::black_box(cache.pop_lru());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_eviction_churn(c: &mut Criterion) {
    c.bench_function("lru_eviction_churn", |b| {
        b.iter_batched(
            || filled(1024),
            |mut cache| {
                for i in 0..4096u64 {
                    cache.insert(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_lru_peek_hotset(c: &mut Criterion) {
    c.bench_function("lru_peek_hotset", |b| {
        let cache = filled(4096);
        b.iter(|| {
            for i in 0..4096u64 {
                let _ = std::hint::black_box(cache.peek(&std::hint::black_box(i)));
            }
        })
    });
}

fn bench_lru_resize_shrink(c: &mut Criterion) {
    c.bench_function("lru_resize_shrink", |b| {
        b.iter_batched(
            || filled(4096),
            |mut cache| {
                cache.resize(std::hint::black_box(1024));
                cache
            },
            BatchSize::SmallInput,
        )
    });
}

// Read-through workload: miss inserts, keys drawn from a Zipf distribution.
fn bench_lru_zipf_read_through(c: &mut Criterion) {
    let universe = 16_384u64;
    let zipf = Zipf::new(universe as f64, 1.0).unwrap();
    c.bench_function("lru_zipf_read_through", |b| {
        b.iter_batched(
            || (LruCache::new(1024), SmallRng::seed_from_u64(42)),
            |(mut cache, mut rng)| {
                let mut hits = 0u64;
                for _ in 0..8192 {
                    let sample: f64 = zipf.sample(&mut rng);
                    let key = (sample as u64).saturating_sub(1).min(universe - 1);
                    if cache.get(&key).is_some() {
                        hits += 1;
                    } else {
                        cache.insert(key, key);
                    }
                }
                std::hint::black_box(hits)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_lru_insert_get,
    bench_lru_pop_lru,
    bench_lru_eviction_churn,
    bench_lru_peek_hotset,
    bench_lru_resize_shrink,
    bench_lru_zipf_read_through
);
criterion_main!(benches);
