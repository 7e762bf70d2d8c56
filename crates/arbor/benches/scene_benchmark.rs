//! # Scene Tick Benchmark
//!
//! One full frame: snapshot, four systems updated in order, buffers
//! submitted to a recording backend.
//!
//! Run with: `cargo bench --package arbor`

#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use arbor::rendering::FrameRecorder;
use arbor::shared::{GestureSample, PhotoLibrary, SharedTreeState};
use arbor::{ArborConfig, Scene};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_scene_tick(c: &mut Criterion) {
    let config = ArborConfig {
        seed: Some(1),
        ..ArborConfig::default()
    };
    let state = Arc::new(SharedTreeState::new());
    let mut scene = Scene::new(&config, Arc::clone(&state), Arc::new(PhotoLibrary::new()));
    let mut backend = FrameRecorder::new();
    state.apply_sample(&GestureSample::hand(true, 0.3, -0.2));

    c.bench_function("scene_tick_default", |b| {
        b.iter(|| {
            let ctx = scene.tick(black_box(1.0 / 60.0), &mut backend);
            black_box(ctx.frame)
        });
    });
}

criterion_group!(benches, bench_scene_tick);
criterion_main!(benches);
