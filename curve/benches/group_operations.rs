use criterion::{black_box, criterion_group, criterion_main, Criterion};
use curve::{
    bn254, derive_point, double_scalar_mul, Affine, Group, Projective, Scalar,
    DEFAULT_MAX_DERIVATION_ITERATIONS,
};
use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_projective_double(c: &mut Criterion) {
    let g = Projective::generator(bn254());
    c.bench_function("projective_double", |bencher| {
        bencher.iter(|| black_box(black_box(g).double()))
    });
}

fn bench_projective_add(c: &mut Criterion) {
    let curve = bn254();
    let g = Projective::generator(curve);
    let h = Projective::from_affine(&curve.hiding_generator().unwrap());
    c.bench_function("projective_add", |bencher| {
        bencher.iter(|| black_box(black_box(g) + black_box(h)))
    });
}

fn bench_scalar_mul(c: &mut Criterion) {
    let curve = bn254();
    let mut rng = StdRng::seed_from_u64(12345);
    let g = Projective::generator(curve);
    let k = Scalar::random(curve, &mut rng).unwrap();

    c.bench_function("projective_scalar_mul", |bencher| {
        bencher.iter(|| black_box(black_box(g).scalar_mul(black_box(&k))))
    });
    c.bench_function("projective_scalar_mul_windowed", |bencher| {
        bencher.iter(|| black_box(black_box(g).scalar_mul_windowed(black_box(&k))))
    });
}

fn bench_double_scalar_mul(c: &mut Criterion) {
    let curve = bn254();
    let mut rng = StdRng::seed_from_u64(12345);
    let g = Projective::generator(curve);
    let h = Projective::from_affine(&curve.hiding_generator().unwrap());
    let a = Scalar::random(curve, &mut rng).unwrap();
    let b = Scalar::random(curve, &mut rng).unwrap();

    c.bench_function("double_scalar_mul", |bencher| {
        bencher.iter(|| black_box(double_scalar_mul(&a, &g, &b, &h)))
    });
}

fn bench_point_codec(c: &mut Criterion) {
    let curve = bn254();
    let encoded = curve.generator().encode();
    let compressed = curve.generator().encode_compressed();
    c.bench_function("decode_uncompressed", |bencher| {
        bencher.iter(|| black_box(Affine::decode(black_box(&encoded), curve)))
    });
    c.bench_function("decode_compressed", |bencher| {
        bencher.iter(|| black_box(Affine::decode(black_box(&compressed), curve)))
    });
}

fn bench_derive_point(c: &mut Criterion) {
    let seed = BigUint::from(0xdead_beefu64) << 192;
    c.bench_function("derive_point", |bencher| {
        bencher.iter(|| {
            black_box(derive_point(
                bn254(),
                black_box(&seed),
                DEFAULT_MAX_DERIVATION_ITERATIONS,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_projective_double,
    bench_projective_add,
    bench_scalar_mul,
    bench_double_scalar_mul,
    bench_point_codec,
    bench_derive_point
);
criterion_main!(benches);
