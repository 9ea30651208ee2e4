use criterion::{Criterion, black_box, criterion_group, criterion_main};
use digest::Digest;
use poseidon::{PoseidonHash, PoseidonParams, PoseidonPermutation};

fn bench_permutation(c: &mut Criterion) {
    let perm = PoseidonPermutation::new(PoseidonParams::DEFAULT);
    let mut state = [1u32; 35];

    c.bench_function("poseidon_permute", |bencher| {
        bencher.iter(|| {
            perm.permute_slice(black_box(&mut state));
        })
    });
}

fn bench_constants(c: &mut Criterion) {
    c.bench_function("poseidon_round_constants", |bencher| {
        bencher.iter(|| black_box(PoseidonPermutation::new(black_box(PoseidonParams::DEFAULT))))
    });
}

fn bench_digest(c: &mut Criterion) {
    let attribute = [7u8; 36];

    c.bench_function("poseidon_digest_36_bytes", |bencher| {
        bencher.iter(|| black_box(PoseidonHash::digest(black_box(attribute))))
    });
}

criterion_group!(benches, bench_permutation, bench_constants, bench_digest);
criterion_main!(benches);
