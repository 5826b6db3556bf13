//! Criterion benchmarks for the payload prober.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hbr_bench::{loose_dump, reference_profile};
use hbr_probe::PayloadProber;

/// Benchmark: Probe a 5K-tick zlib NDJSON dump.
fn bench_probe_zlib_ndjson(c: &mut Criterion) {
    let payload = loose_dump(42, 5_000);
    let prober = PayloadProber::default();

    c.bench_function("probe_zlib_ndjson_5k", |b| {
        b.iter(|| {
            let probe = prober.probe(black_box(&payload)).unwrap();
            black_box(probe.ticks.len());
        });
    });
}

/// Benchmark: Probe a canonical action-log payload, which no route fits.
fn bench_probe_miss(c: &mut Criterion) {
    let file = reference_profile(42);
    let payload = &file[12..];
    let prober = PayloadProber::default();

    c.bench_function("probe_all_routes_miss", |b| {
        b.iter(|| {
            let result = prober.probe(black_box(payload));
            black_box(result.is_err());
        });
    });
}

criterion_group!(benches, bench_probe_zlib_ndjson, bench_probe_miss);
criterion_main!(benches);
