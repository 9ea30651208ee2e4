use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use zkdilithium::{Params, SigningKey, VerifyingKey};

fn bench_keygen(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("zkdilithium_keygen", |bencher| {
        bencher.iter(|| {
            let sk = SigningKey::random(Params::ZK_DILITHIUM, &mut rng).expect("keygen");
            black_box(sk);
        })
    });
}

fn bench_sign(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(Params::ZK_DILITHIUM, &mut rng).expect("keygen");
    let msg = [1u8; 36];

    c.bench_function("zkdilithium_sign", |bencher| {
        bencher.iter(|| {
            let sig = sk.sign(black_box(&msg)).expect("sign");
            black_box(sig);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(Params::ZK_DILITHIUM, &mut rng).expect("keygen");
    let vk = VerifyingKey::from(&sk);
    let msg = [1u8; 36];
    let sig = sk.sign(&msg).expect("sign");

    c.bench_function("zkdilithium_verify", |bencher| {
        bencher.iter(|| {
            let ok = vk.verify(black_box(&msg), black_box(&sig));
            black_box(ok);
        })
    });
}

fn bench_transcript(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let sk = SigningKey::random(Params::ZK_DILITHIUM, &mut rng).expect("keygen");
    let vk = VerifyingKey::from(&sk);
    let sig = sk.sign(&[1u8; 36]).expect("sign");

    c.bench_function("zkdilithium_transcript", |bencher| {
        bencher.iter(|| {
            let transcript = vk.verification_transcript(black_box(&sig)).expect("transcript");
            black_box(transcript);
        })
    });
}

criterion_group!(benches, bench_keygen, bench_sign, bench_verify, bench_transcript);
criterion_main!(benches);
