//! Benchmarks for wave superposition.
//!
//! Performance budgets:
//! - sample_at() with 12 waves: < 300ns
//! - superpose 256x256, 12 waves: < 10ms
//! - superpose 512x512, 12 waves: < 40ms
//! - downsample 512x512 by 4: < 2ms
//!
//! Run with: cargo bench -p qgram-field --bench superpose_bench

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qgram_field::{Grid, WaveTable};

fn bench_sample_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/sample_at");
    let table = WaveTable::golden(12, 432.0);

    group.bench_function("center", |b| {
        b.iter(|| black_box(table.sample_at(black_box(0.0), black_box(0.0))))
    });
    group.bench_function("off_axis", |b| {
        b.iter(|| black_box(table.sample_at(black_box(3.7), black_box(-6.1))))
    });

    group.finish();
}

fn bench_superpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/superpose");
    group.sample_size(20);
    let table = WaveTable::golden(12, 432.0);

    for size in [128usize, 256, 512] {
        let grid = Grid::new(size, size, 10.0);
        group.bench_function(format!("{size}x{size}"), |b| {
            b.iter(|| black_box(table.superpose(black_box(&grid))))
        });
    }

    group.finish();
}

fn bench_downsample(c: &mut Criterion) {
    let mut group = c.benchmark_group("field/downsample");
    let table = WaveTable::golden(12, 432.0);
    let field = table.superpose(&Grid::new(512, 512, 10.0));

    group.bench_function("512x512_by_4", |b| {
        b.iter(|| black_box(field.downsample(black_box(4))))
    });

    group.finish();
}

criterion_group!(benches, bench_sample_at, bench_superpose, bench_downsample);
criterion_main!(benches);
