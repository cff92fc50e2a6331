// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_index --heading-base-level=0

//! Arbor Index: a 2D AABB index for answering "what is on screen" quickly.
//!
//! - Insert axis-aligned bounding boxes (AABBs) or points with small `Copy` payloads.
//! - Query by point or intersecting rectangle.
//! - Bound per-frame cost with [`IndexGeneric::query_rect_capped`], which reports truncation.
//!
//! The index is built wholesale for each data generation and then only
//! queried. It is generic over the scalar type `T` and does not depend on any
//! geometry crate; higher layers convert their own rectangles into [`Aabb2D`].
//!
//! Backends are pluggable via a simple trait. The default backend is a flat
//! vector (linear scan). [`SpatialGrid`] uses a sparse uniform grid over `f64`
//! coordinates, which is what the viewport engine uses for node positions.
//!
//! # Example
//!
//! ```rust
//! use arbor_index::{Aabb2D, Index};
//!
//! let mut idx: Index<i64, u32> = Index::new();
//! let _k1 = idx.insert(Aabb2D::new(0, 0, 10, 10), 1);
//! let _k2 = idx.insert(Aabb2D::new(5, 5, 15, 15), 2);
//!
//! // Query a point inside both boxes.
//! let hits: Vec<_> = idx.query_point(6, 6).map(|(_, p)| p).collect();
//! assert_eq!(hits, [1, 2]);
//! ```
//!
//! Node positions go into a grid, and viewport queries are capped:
//!
//! ```rust
//! use arbor_index::{Aabb2D, SpatialGrid};
//!
//! let grid = SpatialGrid::from_points(512.0, (0..1000_u32).map(|i| (f64::from(i) * 10.0, 0.0, i)));
//!
//! let q = grid.query_rect_capped(Aabb2D::new(0.0, -1.0, 5000.0, 1.0), 400);
//! assert_eq!(q.hits.len(), 400);
//! assert!(q.truncated);
//! ```
//!
//! ## Choosing a backend
//!
//! - `FlatVec` (default): simplest and smallest, linear scans. Good for very
//!   small sets and as the exact reference in tests.
//! - `Grid`: sparse uniform grid keyed by integer cell. Cells that hold nothing
//!   cost nothing, and negative coordinates floor correctly. Choose the cell
//!   size so a typical viewport covers a handful of cells.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. A NaN box never
//! matches a query.

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod index;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::grid::{CellKey, Grid};
pub use index::{CappedQuery, Index, IndexGeneric, Key, SpatialGrid};
pub use types::Aabb2D;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Small deterministic LCG, enough to scatter points without a dev-dependency.
    fn scatter(n: u32, seed: u64) -> Vec<(f64, f64, u32)> {
        let mut s = seed;
        let mut next = move || {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Only the high bits are used as a unit float."
            )]
            let hi = (s >> 40) as u32;
            f64::from(hi) / f64::from(1_u32 << 24)
        };
        (0..n)
            .map(|i| (next() * 8000.0 - 4000.0, next() * 8000.0 - 4000.0, i))
            .collect()
    }

    #[test]
    fn grid_matches_flat_reference() {
        let pts = scatter(600, 7);
        let grid = SpatialGrid::from_points(512.0, pts.iter().copied());
        let mut flat: Index<f64, u32> = Index::new();
        for &(x, y, p) in &pts {
            let _ = flat.insert(Aabb2D::point(x, y), p);
        }

        for rect in [
            Aabb2D::new(-100.0, -100.0, 100.0, 100.0),
            Aabb2D::new(-4000.0, -4000.0, 0.0, 0.0),
            Aabb2D::new(1000.0, -3000.0, 2500.0, 3900.0),
            Aabb2D::new(-1.0e9, -1.0e9, 1.0e9, 1.0e9),
        ] {
            let a: Vec<_> = grid.query_rect(rect).map(|(_, p)| p).collect();
            let b: Vec<_> = flat.query_rect(rect).map(|(_, p)| p).collect();
            assert_eq!(a, b, "grid and flat scan disagree for {rect:?}");
        }
    }

    #[test]
    fn every_point_in_rect_is_reported() {
        let pts = scatter(300, 99);
        let grid = SpatialGrid::from_points(256.0, pts.iter().copied());
        let rect = Aabb2D::new(-700.0, -300.0, 900.0, 1200.0);
        let hits: Vec<_> = grid.query_rect(rect).map(|(_, p)| p).collect();
        for &(x, y, p) in &pts {
            let inside = rect.contains_point(x, y);
            assert_eq!(inside, hits.contains(&p), "point {p} at ({x}, {y})");
        }
    }
}
