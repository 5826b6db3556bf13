//! Criterion benchmarks for whole-file decoding and lazy action iteration.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hbr_bench::{reference_profile, stress_profile};
use hbr_core::{ContainerHeader, PayloadScan};
use hbr_replay::{DecodeOptions, ReplayDecoder, ReplayReader};

/// Benchmark: Resolve the container header of the reference file.
fn bench_header_resolve(c: &mut Criterion) {
    let file = reference_profile(42);

    c.bench_function("header_resolve", |b| {
        b.iter(|| {
            let resolved = ContainerHeader::resolve(black_box(&file), PayloadScan::Fixed).unwrap();
            black_box(resolved.payload.len());
        });
    });
}

/// Benchmark: Decode the reference file (10K actions) to a `Replay`.
fn bench_decode_reference(c: &mut Criterion) {
    let file = reference_profile(42);
    let decoder = ReplayDecoder::new(DecodeOptions::default()).unwrap();

    c.bench_function("decode_reference_10k", |b| {
        b.iter(|| {
            let replay = decoder.decode(black_box(&file)).unwrap();
            black_box(replay.actions.len());
        });
    });
}

/// Benchmark: Decode the stress file (200K actions).
fn bench_decode_stress(c: &mut Criterion) {
    let file = stress_profile(42);
    let decoder = ReplayDecoder::new(DecodeOptions::default()).unwrap();

    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("decode_stress_200k", |b| {
        b.iter(|| {
            let replay = decoder.decode(black_box(&file)).unwrap();
            black_box(replay.actions.len());
        });
    });
    group.finish();
}

/// Benchmark: Walk the action log of an opened reader without collecting.
fn bench_action_iter(c: &mut Criterion) {
    let file = reference_profile(42);
    let reader = ReplayReader::open(&file, &DecodeOptions::default()).unwrap();

    c.bench_function("action_iter_reference_10k", |b| {
        b.iter(|| {
            let mut iter = reader.actions();
            let count = iter.by_ref().count();
            black_box((count, iter.frame()));
        });
    });
}

/// Benchmark: Serialize the decoded reference file to JSON.
fn bench_to_json(c: &mut Criterion) {
    let file = reference_profile(42);
    let replay = ReplayDecoder::new(DecodeOptions::default())
        .unwrap()
        .decode(&file)
        .unwrap();

    c.bench_function("to_json_reference_10k", |b| {
        b.iter(|| {
            let json = replay.to_json().unwrap();
            black_box(json.len());
        });
    });
}

criterion_group!(
    benches,
    bench_header_resolve,
    bench_decode_reference,
    bench_decode_stress,
    bench_action_iter,
    bench_to_json
);
criterion_main!(benches);
