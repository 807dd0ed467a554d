use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hybridsort::{Algorithm, Backend, EngineConfig, Gather, IndexedI32, SortEngine};

fn random_i32(n: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n).map(|_| rng.random()).collect()
}

fn engine(backend: Backend) -> SortEngine {
    SortEngine::new(EngineConfig {
        backend,
        ..EngineConfig::default()
    })
    .unwrap()
}

fn bench_gathers(c: &mut Criterion) {
    let mut group = c.benchmark_group("gather_1M_i32");
    group.sample_size(20);
    let data = random_i32(1_000_000);

    for backend in [Backend::ForkJoin, Backend::TaskQueue] {
        let e = engine(backend);
        for gather in [Gather::Bucket, Gather::Counting, Gather::Merge] {
            for algorithm in [Algorithm::Comparison, Algorithm::RadixCounting] {
                group.bench_with_input(
                    BenchmarkId::new(format!("{}/{}", backend, gather), algorithm),
                    &data,
                    |b, data| {
                        b.iter_batched_ref(
                            || data.clone(),
                            |v| e.sort_i32(black_box(v), gather, algorithm),
                            BatchSize::LargeInput,
                        )
                    },
                );
            }
        }
    }

    group.bench_with_input(BenchmarkId::new("std", "sort_unstable"), &data, |b, data| {
        b.iter_batched_ref(
            || data.clone(),
            |v| black_box(v).sort_unstable(),
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting_radix_sizes");
    let e = engine(Backend::ForkJoin);
    for n in [16 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let data = random_i32(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter_batched_ref(
                || data.clone(),
                |v| e.sort_i32(black_box(v), Gather::Counting, Algorithm::RadixCounting),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_indexed(c: &mut Criterion) {
    let e = engine(Backend::ForkJoin);
    let data: Vec<IndexedI32> = random_i32(1_000_000)
        .into_iter()
        .enumerate()
        .map(|(i, k)| IndexedI32::new(k, i as u32))
        .collect();
    c.bench_function("indexed_merge_1M", |b| {
        b.iter_batched_ref(
            || data.clone(),
            |v| e.sort_indexed_i32(black_box(v), Gather::Merge, Algorithm::RadixCounting),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_gathers, bench_sizes, bench_indexed);
criterion_main!(benches);
