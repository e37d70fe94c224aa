use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geoframe::{AxisIndex, DType, GridArray, ReduceOp, Scalar};

fn create_grid(side: usize) -> GridArray {
    let values: Vec<f64> = (0..side * side).map(|v| (v % 251) as f64 * 0.25).collect();
    let mut grid = GridArray::from_shape_vec(&[side, side], values).unwrap();
    grid.set_at(&[side / 2, side / 2], Scalar::MISSING).unwrap();
    grid
}

fn benchmark_reductions(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_reduce");

    for side in [100, 500, 1_000].iter() {
        let grid = create_grid(*side);
        group.bench_with_input(BenchmarkId::new("mean_skip_missing", side), &grid, |b, grid| {
            b.iter(|| black_box(grid.reduce_skip_missing(ReduceOp::Mean).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("max_skip_missing", side), &grid, |b, grid| {
            b.iter(|| black_box(grid.reduce_skip_missing(ReduceOp::Max).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("unique_counts", side), &grid, |b, grid| {
            b.iter(|| black_box(grid.unique_counts()));
        });
    }

    group.finish();
}

fn benchmark_writes_and_casts(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_write");

    for side in [100, 1_000].iter() {
        let grid = GridArray::zeros(DType::Int32, &[*side, *side]).unwrap();
        group.bench_with_input(BenchmarkId::new("set_block", side), &grid, |b, grid| {
            b.iter(|| {
                let mut grid = grid.clone();
                grid.set(&[AxisIndex::range(0, side / 2), AxisIndex::All], 7)
                    .unwrap();
                black_box(grid)
            });
        });
        group.bench_with_input(BenchmarkId::new("astype_f32", side), &grid, |b, grid| {
            b.iter(|| black_box(grid.astype(DType::Float32).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_reductions, benchmark_writes_and_casts);
criterion_main!(benches);
