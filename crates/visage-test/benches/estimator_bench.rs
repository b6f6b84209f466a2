//! Benchmarks for viseme estimation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use visage_face::PhonemeEstimator;

const SHORT: &str = "Let's go!";
const LONG: &str = "Alright, today we are working on core stability. Keep your hips level, \
                    breathe out as you lift, and hold the top position for two full seconds.";

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate");
    for (name, text) in [("short", SHORT), ("long", LONG)] {
        let duration = PhonemeEstimator::estimate_duration(text);
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            let mut t = 0.0f32;
            b.iter(|| {
                t = (t + 0.016) % duration;
                black_box(PhonemeEstimator::estimate(black_box(text), t))
            })
        });
    }
    group.finish();
}

fn bench_estimate_past_end(c: &mut Criterion) {
    c.bench_function("estimate_past_end", |b| {
        b.iter(|| PhonemeEstimator::estimate(black_box(LONG), black_box(1_000.0)))
    });
}

fn bench_estimate_duration(c: &mut Criterion) {
    c.bench_function("estimate_duration", |b| {
        b.iter(|| PhonemeEstimator::estimate_duration(black_box(LONG)))
    });
}

criterion_group!(
    benches,
    bench_estimate,
    bench_estimate_past_end,
    bench_estimate_duration,
);
criterion_main!(benches);
