//! Benchmarks for statrisk-math eigensolvers.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ndarray::Array2;
use rand::Rng;
use statrisk_math::{JacobiConfig, RandomizedConfig, covariance, jacobi_eigen, randomized_eigen};

fn random_returns(rows: usize, cols: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    Array2::from_shape_fn((rows, cols), |_| rng.r#gen::<f64>() * 0.04 - 0.02)
}

fn bench_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("covariance");

    for n_assets in [10, 50, 100, 250] {
        group.throughput(Throughput::Elements((252 * n_assets) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_assets), &n_assets, |b, &n| {
            let returns = random_returns(252, n);
            b.iter(|| covariance(black_box(&returns.view()), 1).unwrap());
        });
    }

    group.finish();
}

fn bench_jacobi(c: &mut Criterion) {
    let mut group = c.benchmark_group("jacobi_eigen");
    group.sample_size(20);

    for n_assets in [10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n_assets), &n_assets, |b, &n| {
            let cov = covariance(&random_returns(252, n).view(), 1).unwrap();
            b.iter(|| jacobi_eigen(black_box(&cov.view()), &JacobiConfig::default()).unwrap());
        });
    }

    group.finish();
}

fn bench_randomized(c: &mut Criterion) {
    let mut group = c.benchmark_group("randomized_eigen");
    group.sample_size(20);

    for (n_assets, rank) in [(50, 5), (100, 5), (250, 10)] {
        group.bench_with_input(
            BenchmarkId::new("assets_rank", format!("{n_assets}x{rank}")),
            &(n_assets, rank),
            |b, &(n, rank)| {
                let cov = covariance(&random_returns(252, n).view(), 1).unwrap();
                b.iter(|| {
                    randomized_eigen(
                        black_box(&cov.view()),
                        rank,
                        &RandomizedConfig::default(),
                        &JacobiConfig::default(),
                    )
                    .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_covariance, bench_jacobi, bench_randomized);

criterion_main!(benches);
