use ccsds123_difftest::compare::compare_bytes;
use ccsds123_difftest::config::OutputWordSize;
use ccsds123_difftest::cube::{generate_cube, CubeDimensions};
use ccsds123_difftest::golden::normalize_tail;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use derive_enum_all_values::AllValues;
use std::hint::black_box;

// Largest fuzz cube: 2500 pixels by 100 bands.
const MAX_CUBE: CubeDimensions = CubeDimensions::new(100, 25, 100);

fn payload(len: usize, trailing_zeros: usize) -> Vec<u8> {
    let mut data: Vec<u8> = (0..len).map(|i| (i % 251) as u8 | 1).collect();
    data.resize(len + trailing_zeros, 0);
    data
}

fn bench_generate_cube(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.bip");

    let mut group = c.benchmark_group("Cube Generation");
    group.throughput(Throughput::Bytes(MAX_CUBE.byte_len() as u64));
    group.bench_function("sawtooth 100x25x100", |b| {
        b.iter(|| generate_cube(black_box(&path), black_box(MAX_CUBE)).unwrap())
    });
    group.finish();
}

fn bench_normalize_tail(c: &mut Criterion) {
    let data = payload(MAX_CUBE.byte_len(), 64);

    let mut group = c.benchmark_group("Tail Normalization");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for &word_size in OutputWordSize::all_values() {
        group.bench_with_input(
            BenchmarkId::new("normalize_tail", word_size),
            &word_size,
            |b, &word_size| b.iter(|| normalize_tail(black_box(&data), word_size)),
        );
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let golden = payload(MAX_CUBE.byte_len(), 0);
    let mut padded = golden.clone();
    padded.extend_from_slice(&[0; 7]);

    let mut group = c.benchmark_group("Bitstream Comparison");
    group.throughput(Throughput::Bytes(golden.len() as u64));
    group.bench_function("identical", |b| {
        b.iter(|| compare_bytes(black_box(&golden), black_box(&golden)))
    });
    group.bench_function("zero padded", |b| {
        b.iter(|| compare_bytes(black_box(&padded), black_box(&golden)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_generate_cube,
    bench_normalize_tail,
    bench_compare
);
criterion_main!(benches);
