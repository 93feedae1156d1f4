use cesium_skiplist::{
    Config,
    SkipList,
};
use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    BatchSize,
    BenchmarkId,
    Criterion,
    Throughput,
};
use rand::{
    rngs::SmallRng,
    Rng,
    SeedableRng,
};

static SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_keys(count: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(42);
    (0..count).map(|_| rng.gen()).collect()
}

fn filled(keys: &[u64]) -> SkipList<u64> {
    let mut list = SkipList::with_config(Config::default().with_seed(7)).unwrap();
    for &key in keys {
        list.insert(key);
    }
    list
}

// Benchmark building a list from scratch, grow passes included
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("skiplist_insert");

    for size in SIZES.iter() {
        let keys = random_keys(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| black_box(filled(keys)))
        });
    }

    group.finish();
}

// Benchmark point lookups, half hits and half misses
fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("skiplist_contains");

    for size in SIZES.iter() {
        let keys = random_keys(*size);
        let list = filled(&keys);
        let mut rng = SmallRng::seed_from_u64(1);

        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| {
                let key = if rng.gen_bool(0.5) {
                    keys[rng.gen_range(0..keys.len())]
                } else {
                    rng.gen()
                };
                black_box(list.contains(&key))
            })
        });
    }

    group.finish();
}

// Benchmark draining a list, trim passes included
fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("skiplist_delete");

    for size in SIZES.iter() {
        let keys = random_keys(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter_batched(
                || filled(keys),
                |mut list| {
                    for key in keys {
                        black_box(list.delete(key));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_insert, bench_contains, bench_delete
);
criterion_main!(benches);
