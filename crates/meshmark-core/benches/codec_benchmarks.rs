//! Benchmarks for the vertex-set codec

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use meshmark_core::{SortedVertexSet, VertexCodec};

/// Region-like vertex set: clustered runs with gaps, as painting produces.
fn generate_region(n: usize) -> SortedVertexSet {
    (0..n as u32)
        .map(|i| (i / 64) * 512 + (i % 64) * 3)
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("vertex_encode");
    let codec = VertexCodec::new();

    for size in [1_000, 10_000, 50_000].iter() {
        let region = generate_region(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(codec.encode_set(black_box(&region))));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("vertex_decode");
    let codec = VertexCodec::new();

    for size in [1_000, 10_000, 50_000].iter() {
        let payload = codec
            .encode_set(&generate_region(*size))
            .unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(codec.decode(black_box(&payload))));
        });
    }

    group.finish();
}

fn bench_membership_insert(c: &mut Criterion) {
    c.bench_function("membership_insert_10k", |b| {
        b.iter(|| {
            let mut set = SortedVertexSet::new();
            for i in 0..10_000u32 {
                set.insert(black_box(i.wrapping_mul(2_654_435_761) % 50_000));
            }
            black_box(set)
        });
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_membership_insert);
criterion_main!(benches);
