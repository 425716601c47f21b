//! Criterion benchmarks for the numeric kernels.
//! Run with: cargo bench -p deblur --features bench

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};

use crate::convolution::{correlate, correlate_grid};
use crate::grid::PixelGrid;
use crate::kernel::Kernel;
use crate::noise::{NoiseInjector, NoiseType};
use crate::restore::{restore, DeconvolutionMethod, RestoreConfig};
use crate::Channel;

fn synthetic_grid(size: usize) -> PixelGrid {
    PixelGrid::from_fn(size, size, |x, y| {
        [
            ((x * 7 + y * 3) % 256) as u8,
            ((x ^ y) % 256) as u8,
            if (x / 16 + y / 16) % 2 == 0 { 200 } else { 40 },
        ]
    })
    .expect("benchmark grid size is positive")
}

fn gaussian_kernel(size: usize) -> Kernel {
    Kernel::gaussian(size, size as f64 / 4.0).expect("benchmark kernel parameters are valid")
}

pub fn convolution_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlate");

    for kernel_size in [3, 9, 15] {
        let channel = Channel::from_fn(512, 512, |x, y| ((x + y) % 256) as f64);
        let kernel = gaussian_kernel(kernel_size);
        group.throughput(Throughput::Elements((512 * 512) as u64));
        group.bench_function(BenchmarkId::new("channel_512", kernel_size), |b| {
            b.iter(|| correlate(black_box(&channel), black_box(&kernel)))
        });
    }

    let grid = synthetic_grid(256);
    let kernel = gaussian_kernel(9);
    group.bench_function("grid_256_k9", |b| {
        b.iter(|| correlate_grid(black_box(&grid), black_box(&kernel)))
    });

    group.finish();

    let mut group = c.benchmark_group("noise");
    for noise in [
        NoiseType::default_gaussian(),
        NoiseType::default_salt_and_pepper(),
        NoiseType::Poisson,
        NoiseType::Speckle { stddev: 0.1 },
    ] {
        group.bench_function(noise.to_string(), |b| {
            let mut injector = NoiseInjector::new(Some(42));
            b.iter_batched(
                || grid.clone(),
                |mut grid| {
                    let _ = injector.apply(&mut grid, &noise);
                    grid
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

pub fn restore_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("restore");
    group.sample_size(10);

    let kernel = gaussian_kernel(9);
    let observed = correlate_grid(&synthetic_grid(128), &kernel);

    for method in [
        DeconvolutionMethod::RichardsonLucy,
        DeconvolutionMethod::tikhonov(0.01),
        DeconvolutionMethod::total_variation(1.0, 0.01, 1.0),
    ] {
        let config = RestoreConfig {
            method,
            iterations: 10,
        };
        group.bench_function(BenchmarkId::new("128_k9_x10", method), |b| {
            b.iter(|| restore(black_box(&observed), black_box(&kernel), &config))
        });
    }

    group.finish();
}
