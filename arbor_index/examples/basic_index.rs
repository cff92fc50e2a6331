// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Arbor Index: fill a grid with points and run a capped viewport query.

use arbor_index::{Aabb2D, SpatialGrid};

fn main() {
    // A 40x40 lattice of node positions, 180 units apart.
    let points = (0..1600_u32).map(|i| {
        let col = f64::from(i % 40);
        let row = f64::from(i / 40);
        (col * 180.0, row * 180.0, i)
    });
    let grid = SpatialGrid::from_points(512.0, points);
    println!("{:?}", grid.backend());

    let viewport = Aabb2D::from_xywh(900.0, 900.0, 1280.0, 720.0);
    let q = grid.query_rect_capped(viewport, 400);
    println!(
        "visible: {} (truncated: {}), first ids: {:?}",
        q.hits.len(),
        q.truncated,
        q.payloads().take(8).collect::<Vec<_>>()
    );

    let zoomed_out = viewport.inflate(20_000.0, 20_000.0);
    let q = grid.query_rect_capped(zoomed_out, 400);
    println!("zoomed out: {} (truncated: {})", q.hits.len(), q.truncated);
}
