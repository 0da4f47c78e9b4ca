//! Benchmarks for the Keccak sponge

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kek_core::{ConcreteSpec, HmacState, SHA3_SUFFIX, SHAKE_SUFFIX, SpongeState};

fn bench_sha3_256(c: &mut Criterion) {
    let spec = ConcreteSpec::sha3(256).unwrap();
    let mut group = c.benchmark_group("sha3_256");

    for size in [64usize, 1024, 16 * 1024] {
        let input = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            let mut state = SpongeState::new(&spec).unwrap();
            let mut out = [0u8; 32];
            b.iter(|| {
                state.reset();
                state
                    .digest_into(black_box(input), 0, SHA3_SUFFIX, Some(&mut out))
                    .unwrap();
                out
            })
        });
    }
    group.finish();
}

fn bench_word_sizes(c: &mut Criterion) {
    let input = vec![0xa5u8; 4096];
    let mut group = c.benchmark_group("word_size");
    group.throughput(Throughput::Bytes(input.len() as u64));

    for (w, spec) in [
        (8, ConcreteSpec::new(160, 40, 40)),
        (16, ConcreteSpec::new(320, 80, 80)),
        (32, ConcreteSpec::new(640, 160, 160)),
        (64, ConcreteSpec::new(1088, 512, 256)),
    ] {
        let spec = spec.unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(w), &input, |b, input| {
            let mut state = SpongeState::new(&spec).unwrap();
            b.iter(|| {
                state.reset();
                state.digest(black_box(input), 0, SHA3_SUFFIX).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_squeeze(c: &mut Criterion) {
    let spec = ConcreteSpec::shake(256, 512).unwrap();
    let mut state = SpongeState::new(&spec).unwrap();
    state.digest_into(b"seed", 0, SHAKE_SUFFIX, None).unwrap();
    let mut out = [0u8; 64];

    c.bench_function("shake256_squeeze", |b| {
        b.iter(|| state.squeeze_into(black_box(&mut out)))
    });
    c.bench_function("shake256_fast_squeeze_1000", |b| {
        b.iter(|| state.fast_squeeze(black_box(1000)))
    });
}

fn bench_hmac(c: &mut Criterion) {
    let spec = ConcreteSpec::sha3(256).unwrap();
    let mut mac = HmacState::new(&spec, b"benchmark key", 13 * 8).unwrap();
    let input = b"benchmark input data for keyed hashing";

    c.bench_function("hmac_sha3_256", |b| {
        b.iter(|| {
            mac.reset(None).unwrap();
            mac.digest(black_box(input), 0, SHA3_SUFFIX).unwrap()
        })
    });
}

criterion_group!(benches, bench_sha3_256, bench_word_sizes, bench_squeeze, bench_hmac);
criterion_main!(benches);
