// ============================================================================
// Period Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Normalisation - narrow fast paths against the wide accumulator
// 2. Scaling - duration route (small factors) against direct field scaling
// 3. Bridge - timestamp differences and duration conversion
// ============================================================================

use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use iso_period::prelude::*;

// ============================================================================
// Normalisation Benchmarks
// ============================================================================

fn benchmark_normalise(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalise");

    let inputs = [
        ("clock_fast_path", Period::new_hms(30, 125, 3000).unwrap()),
        ("calendar_fast_path", Period::new_ymd(3, 40, 0).unwrap()),
        ("wide_accumulator", Period::new(3, 40, 61, 30, 125, 3000).unwrap()),
    ];

    for (name, period) in inputs.iter() {
        for precise in [true, false] {
            group.bench_with_input(
                BenchmarkId::new(*name, if precise { "precise" } else { "imprecise" }),
                period,
                |b, p| b.iter(|| black_box(p.normalise(precise))),
            );
        }
    }

    group.finish();
}

// ============================================================================
// Scaling Benchmarks
// ============================================================================

fn benchmark_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scale");
    let period = Period::new(1, 2, 3, 4, 5, 6).unwrap();

    // below 0.5 the duration route is taken
    for factor in [0.1, 0.3, 0.5, 2.0, 7.5].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(factor), factor, |b, &f| {
            b.iter(|| black_box(period.scale(f)))
        });
    }

    group.finish();
}

// ============================================================================
// Bridge Benchmarks
// ============================================================================

fn benchmark_bridge(c: &mut Criterion) {
    let mut group = c.benchmark_group("bridge");

    let start = Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap();
    for (name, end) in [
        ("between_days", Utc.with_ymd_and_hms(2003, 7, 8, 9, 10, 11).unwrap()),
        ("between_calendar", Utc.with_ymd_and_hms(2019, 7, 8, 2, 10, 11).unwrap()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(Period::between(&start, &end)))
        });
    }

    for (name, d) in [
        ("from_duration_hms", TimeDelta::minutes(12_345)),
        ("from_duration_days", TimeDelta::days(400)),
        ("from_duration_years", TimeDelta::days(40_000)),
    ] {
        group.bench_function(name, |b| b.iter(|| black_box(Period::from_duration(d))));
    }

    let period = Period::new(1, 2, 3, 4, 5, 6).unwrap();
    group.bench_function("to_duration", |b| b.iter(|| black_box(period.to_duration())));
    group.bench_function("add_to", |b| b.iter(|| black_box(period.add_to(start))));

    group.finish();
}

criterion_group!(benches, benchmark_normalise, benchmark_scale, benchmark_bridge);
criterion_main!(benches);
