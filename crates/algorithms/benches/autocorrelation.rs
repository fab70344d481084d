//! Benchmarks for graph autocorrelation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphstat_algorithms::statistics::{morans_i_matrix, morans_i_sparse, morans_i_vec};
use graphstat_core::{CsrGraph, CsrValues};
use ndarray::{Array1, Array2};

/// Symmetric ring with `k` neighbors on each side, a stand-in for a kNN
/// connectivity graph.
fn ring_graph(n: usize, k: usize) -> CsrGraph {
    let mut edges = Vec::with_capacity(2 * k * n);
    for i in 0..n {
        for d in 1..=k {
            edges.push((i, (i + d) % n, 1.0 / d as f64));
            edges.push((i, (i + n - d) % n, 1.0 / d as f64));
        }
    }
    CsrGraph::from_edges(n, &edges).unwrap()
}

/// Deterministic pseudo-random features with mild spatial structure.
fn feature_matrix(m: usize, n: usize) -> Array2<f64> {
    Array2::from_shape_fn((m, n), |(k, i)| {
        let base = ((i * 31 + k * 17) % 97) as f64 / 97.0;
        base + (i as f64 / n as f64)
    })
}

fn bench_vector(c: &mut Criterion) {
    let mut group = c.benchmark_group("morans_i_vec");

    for n in [1_000, 10_000, 100_000].iter() {
        let g = ring_graph(*n, 8);
        let x: Array1<f64> = feature_matrix(1, *n).row(0).to_owned();

        group.bench_with_input(BenchmarkId::from_parameter(n), n, |b, _| {
            b.iter(|| morans_i_vec(black_box(&g), black_box(x.view())).unwrap())
        });
    }
    group.finish();
}

fn bench_matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("morans_i_matrix");

    for m in [16, 64, 256].iter() {
        let n = 10_000;
        let g = ring_graph(n, 8);
        let x = feature_matrix(*m, n);

        group.bench_with_input(BenchmarkId::from_parameter(m), m, |b, _| {
            b.iter(|| morans_i_matrix(black_box(&g), black_box(x.view())).unwrap())
        });
    }
    group.finish();
}

fn bench_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("morans_i_sparse");

    for m in [16, 64, 256].iter() {
        let n = 10_000;
        let g = ring_graph(n, 8);
        // ~10% density, typical for count matrices
        let dense = feature_matrix(*m, n).mapv(|v| if v.fract() < 0.1 { v } else { 0.0 });
        let x = CsrValues::from_dense(&dense);

        group.bench_with_input(BenchmarkId::from_parameter(m), m, |b, _| {
            b.iter(|| morans_i_sparse(black_box(&g), black_box(&x)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_vector, bench_matrix, bench_sparse);
criterion_main!(benches);
