use attestation::{AttestationCrypto, AttestationType, barrett_map_to_integer, map_to_integer};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_hash(c: &mut Criterion) {
    let message = b"alice@example.com";
    c.bench_function("map_to_integer", |bencher| {
        bencher.iter(|| black_box(map_to_integer(black_box(message))))
    });
    c.bench_function("barrett_map_to_integer", |bencher| {
        bencher.iter(|| black_box(barrett_map_to_integer(black_box(message))))
    });
}

fn bench_commit(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let crypto = AttestationCrypto::new();
    let secret = crypto.make_secret(&mut rng).expect("secret");

    c.bench_function("commit", |bencher| {
        bencher.iter(|| {
            let commitment = crypto
                .commit(black_box("alice@example.com"), AttestationType::Mail, &secret)
                .expect("commit");
            black_box(commitment);
        })
    });
}

fn bench_prove(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let crypto = AttestationCrypto::new();
    let secret = crypto.make_secret(&mut rng).expect("secret");

    c.bench_function("prove_attestation_request", |bencher| {
        bencher.iter(|| {
            let proof = crypto
                .prove_attestation_request(black_box(&secret), &mut rng)
                .expect("prove");
            black_box(proof);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let crypto = AttestationCrypto::new();
    let s1 = crypto.make_secret(&mut rng).expect("secret");
    let s2 = crypto.make_secret(&mut rng).expect("secret");
    let c1 = crypto
        .commit("alice@example.com", AttestationType::Mail, &s1)
        .expect("commit");
    let c2 = crypto
        .commit("alice@example.com", AttestationType::Mail, &s2)
        .expect("commit");
    let proof = crypto
        .prove_equality(&c1, &c2, &s1, &s2, &mut rng)
        .expect("prove");

    c.bench_function("verify_equality", |bencher| {
        bencher.iter(|| {
            let ok = crypto
                .verify_equality(black_box(&c1), black_box(&c2), black_box(&proof))
                .expect("verify");
            black_box(ok);
        })
    });
}

fn bench_legacy_generator(c: &mut Criterion) {
    let crypto = AttestationCrypto::legacy();
    c.bench_function("legacy_identifier_generator", |bencher| {
        bencher.iter(|| {
            let generator = crypto
                .identifier_generator(AttestationType::Mail, black_box("alice@example.com"))
                .expect("derive");
            black_box(generator);
        })
    });
}

criterion_group!(
    benches,
    bench_hash,
    bench_commit,
    bench_prove,
    bench_verify,
    bench_legacy_generator
);
criterion_main!(benches);
