//! Benchmarks for the VaR estimators.
//!
//! Run with: cargo bench -p tailrisk-var

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tailrisk_var::prelude::*;

/// One year of deterministic daily returns in roughly the ±4% band.
fn sample_year() -> Vec<f64> {
    (0..252)
        .map(|i| {
            let mut x = (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
            x ^= x >> 33;
            (x % 8_000) as f64 / 100_000.0 - 0.04
        })
        .collect()
}

fn bench_historical(c: &mut Criterion) {
    let returns = sample_year();
    c.bench_function("historical_var_252d", |b| {
        b.iter(|| historical_var(black_box(&returns), 0.95, 1_000_000.0))
    });
}

fn bench_parametric(c: &mut Criterion) {
    let returns = sample_year();
    c.bench_function("parametric_var_normal_252d", |b| {
        b.iter(|| parametric_var(black_box(&returns), 0.95, Distribution::Normal, 1_000_000.0))
    });
    c.bench_function("parametric_var_student_t_252d", |b| {
        b.iter(|| {
            parametric_var(
                black_box(&returns),
                0.95,
                Distribution::StudentT,
                1_000_000.0,
            )
        })
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let returns = sample_year();
    c.bench_function("monte_carlo_var_10k", |b| {
        b.iter(|| monte_carlo_var_seeded(black_box(&returns), 0.95, 10_000, 1_000_000.0, 42))
    });
}

criterion_group!(
    estimators,
    bench_historical,
    bench_parametric,
    bench_monte_carlo,
);
criterion_main!(estimators);
