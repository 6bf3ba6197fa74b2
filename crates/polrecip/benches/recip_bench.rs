//! Criterion benchmarks for reciprocation and the centre solvers.
//!
//! - `dual`: one reciprocation of jittered solids (no solving).
//! - `midsphere` / `canonical`: full solves from a seeded offset centre.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polrecip::api::{
    build_dual, canonical, cube, dodecahedron, icosahedron, jitter, midsphere, prism, Balance,
    IterCfg,
};
use polrecip::Vec3;

fn bench_dual(c: &mut Criterion) {
    let mut group = c.benchmark_group("dual");
    let solids = [
        ("cube", cube()),
        ("icosahedron", icosahedron()),
        ("dodecahedron", dodecahedron()),
        ("prism24", prism(24, 0.5)),
    ];
    for (name, solid) in solids {
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter_batched(
                || jitter(&solid, 0.01, 11),
                |m| {
                    let _ = black_box(build_dual(&m, Vec3::zeros(), 1.0));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solvers");
    let seed = Some(Vec3::new(0.05, -0.03, 0.02));
    let m = jitter(&icosahedron(), 0.01, 3);
    group.bench_function(BenchmarkId::new("midsphere", "icosahedron"), |b| {
        b.iter(|| black_box(midsphere(&m, seed, None, IterCfg::default())))
    });
    for (name, balance) in [
        ("edge", Balance::Edge),
        ("vertex_face", Balance::VertexFace),
        ("combined", Balance::Combined),
    ] {
        group.bench_function(BenchmarkId::new("canonical", name), |b| {
            b.iter(|| {
                black_box(canonical(
                    &m,
                    balance,
                    false,
                    seed,
                    None,
                    IterCfg::default(),
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dual, bench_solvers);
criterion_main!(benches);
