// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_engine::Engine;
use arbor_layout::{LayoutIndices, fanout_tree};
use arbor_view::GestureInput;
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

fn bench_indices(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_indices");
    for &n in &[500_usize, 5_000, 20_000] {
        let records = fanout_tree(n, 3, 200.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("build_n{n}"), |b| {
            b.iter_batched(
                || records.clone(),
                |records| black_box(LayoutIndices::build(records).0.len()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn loaded_engine(n: usize) -> Engine {
    let mut e = Engine::default();
    e.set_viewport(Size::new(1170.0, 2532.0), 3.0);
    e.load_nodes(fanout_tree(n, 3, 200.0));
    e
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_load");
    for &n in &[500_usize, 5_000] {
        let records = fanout_tree(n, 3, 200.0);
        group.bench_function(format!("load_and_first_frame_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut e = Engine::default();
                    e.set_viewport(Size::new(1170.0, 2532.0), 3.0);
                    (e, records.clone())
                },
                |(mut e, records)| {
                    e.load_nodes(records);
                    black_box(e.tick(0).map(|f| f.list.len()));
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// One second of dragging at 60 Hz, committing whenever the throttle allows.
fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_drag");
    for &n in &[500_usize, 5_000] {
        group.throughput(Throughput::Elements(60));
        group.bench_function(format!("drag_60_samples_n{n}"), |b| {
            b.iter_batched(
                || {
                    let mut e = loaded_engine(n);
                    e.tick(0);
                    e
                },
                |mut e| {
                    let mut finger = Point::new(585.0, 1266.0);
                    e.handle_gesture(GestureInput::PanBegin { position: finger }, 0);
                    let mut commits = 0_u32;
                    for i in 1..=60_u64 {
                        finger.x -= 30.0;
                        e.handle_gesture(GestureInput::PanUpdate { position: finger }, i * 16);
                        if e.tick(i * 16).is_some() {
                            commits += 1;
                        }
                    }
                    black_box(commits);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_indices, bench_load, bench_drag);
criterion_main!(benches);
