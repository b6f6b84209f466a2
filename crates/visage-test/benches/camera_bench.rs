//! Benchmarks for camera framing

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use visage_camera::CameraFramingController;
use visage_core::{PresentationMode, Vec3};

const TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);

fn bench_full_body_tick(c: &mut Criterion) {
    let mut camera = CameraFramingController::default();

    c.bench_function("camera_full_body_tick", |b| {
        b.iter(|| black_box(camera.tick(PresentationMode::FullBody, black_box(TARGET))))
    });
}

fn bench_transition(c: &mut Criterion) {
    c.bench_function("camera_full_transition", |b| {
        b.iter(|| {
            let mut camera = CameraFramingController::default();
            camera.tick(PresentationMode::FullBody, TARGET);
            while !camera.is_at_target() {
                camera.tick(PresentationMode::FaceOnly, TARGET);
            }
            black_box(camera.pose())
        })
    });
}

fn bench_mode_flip(c: &mut Criterion) {
    let mut camera = CameraFramingController::default();

    c.bench_function("camera_mode_flip", |b| {
        let mut face = false;
        b.iter(|| {
            face = !face;
            let mode = if face {
                PresentationMode::FaceOnly
            } else {
                PresentationMode::FullBody
            };
            black_box(camera.tick(mode, TARGET))
        })
    });
}

criterion_group!(benches, bench_full_body_tick, bench_transition, bench_mode_flip);
criterion_main!(benches);
