use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lattice::{Poly, Q, sample_matrix, shake256};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_poly(rng: &mut StdRng) -> Poly {
    Poly::new(core::array::from_fn(|_| rng.random_range(0..Q)))
}

fn bench_ntt(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = random_poly(&mut rng);

    c.bench_function("poly_ntt", |bencher| {
        bencher.iter(|| black_box(black_box(&p).ntt()))
    });
    c.bench_function("poly_inv_ntt", |bencher| {
        bencher.iter(|| black_box(black_box(&p).inv_ntt()))
    });
}

fn bench_schoolbook(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let a = random_poly(&mut rng);
    let b = random_poly(&mut rng);

    c.bench_function("poly_schoolbook_mul", |bencher| {
        bencher.iter(|| black_box(black_box(&a).schoolbook_mul(black_box(&b))))
    });
}

fn bench_sample_matrix(c: &mut Criterion) {
    let rho = shake256(&[b"bench".as_slice()], 32);

    c.bench_function("sample_matrix_4x4", |bencher| {
        bencher.iter(|| black_box(sample_matrix(black_box(&rho), 4, 4)))
    });
}

criterion_group!(benches, bench_ntt, bench_schoolbook, bench_sample_matrix);
criterion_main!(benches);
