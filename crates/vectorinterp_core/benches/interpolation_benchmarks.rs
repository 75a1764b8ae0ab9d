//! Criterion benchmarks for vectorinterp_core.
//!
//! Compares sequential (cache-friendly) and random query patterns, and
//! batch queries on one versus several workers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use vectorinterp_core::{
    AkimaInterpolator, BivariateLinearInterpolator, ExtrapolationMode, LinearInterpolator,
    SlerpInterpolator,
};

/// Regularly spaced series with a smooth signal.
fn generate_series(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.1).collect();
    let ys: Vec<f64> = xs.iter().map(|&x| x.sin() + 0.01 * x).collect();
    (xs, ys)
}

/// `count` queries spread over `[0, max)`, either sorted or shuffled.
fn generate_queries(count: usize, max: f64, shuffled: bool) -> Vec<f64> {
    let mut queries: Vec<f64> = (0..count).map(|i| max * i as f64 / count as f64).collect();
    if shuffled {
        let mut rng = StdRng::seed_from_u64(42);
        queries.shuffle(&mut rng);
    }
    queries
}

/// Benchmark cache behaviour of sequential vs random lookups.
fn bench_query_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_patterns");

    for size in [100, 10_000] {
        let (xs, ys) = generate_series(size);
        let max = xs[size - 1];

        for (label, shuffled) in [("sequential", false), ("random", true)] {
            let queries = generate_queries(1000, max, shuffled);

            let mut linear = LinearInterpolator::new(&xs, &ys, ExtrapolationMode::Fail).unwrap();
            group.bench_with_input(BenchmarkId::new(format!("linear_{}", label), size), &queries, |b, qs| {
                b.iter(|| {
                    for &x in qs {
                        black_box(linear.interpolate(black_box(x)).unwrap());
                    }
                });
            });

            let mut akima = AkimaInterpolator::new(&xs, &ys, ExtrapolationMode::Fail).unwrap();
            group.bench_with_input(BenchmarkId::new(format!("akima_{}", label), size), &queries, |b, qs| {
                b.iter(|| {
                    for &x in qs {
                        black_box(akima.interpolate(black_box(x)).unwrap());
                    }
                });
            });
        }
    }

    group.finish();
}

/// Benchmark Akima construction (slope computation).
fn bench_akima_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("akima_construction");

    for size in [100, 10_000] {
        let (xs, ys) = generate_series(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &(&xs, &ys), |b, (xs, ys)| {
            b.iter(|| AkimaInterpolator::new(black_box(xs), black_box(ys), ExtrapolationMode::Extrapolate).unwrap());
        });
    }

    group.finish();
}

/// Benchmark batch queries on 1 and 4 workers.
fn bench_batch_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_queries");

    let (xs, ys) = generate_series(10_000);
    let queries = generate_queries(100_000, xs[xs.len() - 1], false);
    let akima = AkimaInterpolator::new(&xs, &ys, ExtrapolationMode::Fail).unwrap();

    let ypr: Vec<[f64; 3]> = xs.iter().map(|&x| [x * 3.0, 10.0 * x.sin(), 5.0 * x.cos()]).collect();
    let slerp = SlerpInterpolator::from_ypr(&xs, &ypr, true, ExtrapolationMode::Fail).unwrap();

    for workers in [1, 4] {
        group.bench_with_input(BenchmarkId::new("akima", workers), &workers, |b, &w| {
            b.iter(|| akima.interpolate_many(black_box(&queries), w).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("slerp_ypr", workers), &workers, |b, &w| {
            b.iter(|| slerp.ypr_many(black_box(&queries), true, w).unwrap());
        });
    }

    group.finish();
}

/// Benchmark grid evaluation of the bivariate interpolator.
fn bench_bivariate_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("bivariate_grid");

    let cols: Vec<f64> = (0..200).map(|i| i as f64).collect();
    let mut grid = BivariateLinearInterpolator::new(ExtrapolationMode::Extrapolate);
    for r in 0..50 {
        let row = r as f64;
        let values: Vec<f64> = cols.iter().map(|&c| (row * 0.1).sin() * (c * 0.05).cos()).collect();
        grid.append_row(row, &cols, &values).unwrap();
    }

    let query_rows: Vec<f64> = (0..100).map(|i| i as f64 * 0.49).collect();
    let query_cols: Vec<f64> = (0..400).map(|i| i as f64 * 0.5).collect();

    for workers in [1, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            b.iter(|| grid.interpolate_grid(black_box(&query_rows), black_box(&query_cols), w).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_query_patterns,
    bench_akima_construction,
    bench_batch_queries,
    bench_bivariate_grid
);
criterion_main!(benches);
