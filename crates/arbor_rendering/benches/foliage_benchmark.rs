//! # Foliage Frame Benchmark
//!
//! One frame of the largest population: 15,000 points eased, transformed
//! and colored on the CPU.
//!
//! Run with: `cargo bench --package arbor_rendering`

#![allow(missing_docs)]

use std::hint::black_box;

use arbor_rendering::{FoliageField, FoliageParams, OrnamentField, OrnamentParams};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_foliage_frame(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut field = FoliageField::build(FoliageParams::default(), &mut rng);
    let mut time = 0.0_f32;

    c.bench_function("foliage_frame_15k", |b| {
        b.iter(|| {
            time += 1.0 / 60.0;
            field.advance(black_box(1.0), 1.0 / 60.0, time);
            black_box(field.vertices().len())
        });
    });
}

fn bench_foliage_build(c: &mut Criterion) {
    c.bench_function("foliage_build_15k", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(2);
            black_box(FoliageField::build(FoliageParams::default(), &mut rng).len())
        });
    });
}

fn bench_ornament_frame(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let mut field = OrnamentField::build(&OrnamentParams::default(), &mut rng);
    let mut time = 0.0_f32;

    c.bench_function("ornament_frame_300", |b| {
        b.iter(|| {
            time += 1.0 / 60.0;
            field.advance(black_box(1.0), 1.0 / 60.0, time);
            black_box(field.instances().len())
        });
    });
}

criterion_group!(benches, bench_foliage_frame, bench_foliage_build, bench_ornament_frame);
criterion_main!(benches);
