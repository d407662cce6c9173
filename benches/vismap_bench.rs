//! Benchmarks for the two dominant-cost kernels: line-of-sight extinction
//! averaging and occlusion ray casting.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use drishti_map::vis::{blocked_footprint, mean_extinction_field, occlusion_mask};
use drishti_map::{Field2D, Obstruction, SliceGrid};

fn synthetic_slice(n: usize) -> Field2D<f32> {
    let mut slice = Field2D::filled(n, n, 0.0f32);
    for i in 0..n {
        for j in 0..n {
            slice.set(i, j, 0.05 + ((i * 7 + j * 3) % 11) as f32 * 0.02);
        }
    }
    slice
}

fn bench_mean_extinction(c: &mut Criterion) {
    let mut group = c.benchmark_group("mean_extinction");
    for n in [32usize, 64] {
        let slice = synthetic_slice(n);
        group.bench_function(format!("{n}x{n}"), |b| {
            b.iter(|| mean_extinction_field(black_box((n / 2, n / 2)), black_box(&slice)));
        });
    }
    group.finish();
}

fn bench_occlusion(c: &mut Criterion) {
    let n = 64usize;
    let axis: Vec<f32> = (0..n).map(|v| v as f32 * 0.5).collect();
    let grid = SliceGrid::new(axis.clone(), axis).unwrap();
    let obstructions = vec![
        Obstruction::new((4.0, 6.0), (2.0, 20.0), (0.0, 3.0)),
        Obstruction::new((10.0, 24.0), (12.0, 13.0), (0.0, 3.0)),
    ];
    let blocked = blocked_footprint(&grid, &obstructions, 2.0);

    c.bench_function("occlusion_64x64", |b| {
        b.iter(|| occlusion_mask(black_box((n / 2, n / 2)), black_box(&blocked)));
    });
}

criterion_group!(benches, bench_mean_extinction, bench_occlusion);
criterion_main!(benches);
