// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_index::{Aabb2D, Index, SpatialGrid};
use arbor_layout::{LayoutIndices, NodeId, fanout_tree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn display_boxes(n: usize) -> Vec<(Aabb2D<f64>, NodeId)> {
    let (idx, _) = LayoutIndices::build(fanout_tree(n, 3, 200.0));
    idx.ids()
        .iter()
        .filter_map(|&id| {
            let r = idx.display_rect(id)?;
            Some((Aabb2D::new(r.x0, r.y0, r.x1, r.y1), id))
        })
        .collect()
}

/// Viewport-sized windows walking along the widest generation.
fn windows(count: usize) -> Vec<Aabb2D<f64>> {
    (0..count)
        .map(|i| Aabb2D::from_xywh(i as f64 * 350.0, 700.0, 928.0, 728.0))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[500_usize, 5_000, 20_000] {
        let boxes = display_boxes(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("flatvec_n{n}"), |b| {
            b.iter_batched(
                Index::<f64, NodeId>::new,
                |mut idx| {
                    for &(r, id) in &boxes {
                        let _ = idx.insert(r, id);
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("grid512_n{n}"), |b| {
            b.iter_batched(
                || SpatialGrid::<NodeId>::with_cell_size(512.0),
                |mut idx| {
                    for &(r, id) in &boxes {
                        let _ = idx.insert(r, id);
                    }
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_viewport_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_query");
    let queries = windows(64);
    for &n in &[500_usize, 5_000, 20_000] {
        let boxes = display_boxes(n);
        let mut flat = Index::<f64, NodeId>::new();
        for &(r, id) in &boxes {
            let _ = flat.insert(r, id);
        }
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("flatvec_n{n}"), |b| {
            b.iter(|| {
                let total: usize = queries.iter().map(|&q| flat.query_rect(q).count()).sum();
                black_box(total);
            });
        });
        for &cell in &[256.0, 512.0, 1024.0] {
            let mut grid = SpatialGrid::<NodeId>::with_cell_size(cell);
            for &(r, id) in &boxes {
                let _ = grid.insert(r, id);
            }
            group.bench_function(format!("grid{cell}_n{n}"), |b| {
                b.iter(|| {
                    let total: usize =
                        queries.iter().map(|&q| grid.query_rect_capped(q, 400).hits.len()).sum();
                    black_box(total);
                });
            });
        }
    }
    group.finish();
}

fn bench_zoomed_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("zoomed_out_capped");
    let boxes = display_boxes(20_000);
    let mut grid = SpatialGrid::<NodeId>::with_cell_size(512.0);
    for &(r, id) in &boxes {
        let _ = grid.insert(r, id);
    }
    let everything = Aabb2D::new(-1e6, -1e6, 1e6, 1e6);
    group.bench_function("grid512_cap400", |b| {
        b.iter(|| black_box(grid.query_rect_capped(everything, 400).truncated));
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_viewport_queries, bench_zoomed_out);
criterion_main!(benches);
