// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Index` API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::{FlatVec, Grid};
use crate::types::Aabb2D;

/// Handle for an entry, valid until the next [`IndexGeneric::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(u32);

impl Key {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index keys are intentionally 32-bit; trees never approach that many nodes."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
struct Entry<T, P> {
    aabb: Aabb2D<T>,
    payload: P,
}

/// Result of a capped range query.
#[derive(Clone, Debug, PartialEq)]
pub struct CappedQuery<P> {
    /// Matches in ascending key order, at most `cap` of them.
    pub hits: Vec<(Key, P)>,
    /// True if at least one further match was dropped by the cap.
    pub truncated: bool,
}

impl<P> CappedQuery<P> {
    /// Payloads only, in hit order.
    pub fn payloads(&self) -> impl Iterator<Item = &P> + '_ {
        self.hits.iter().map(|(_, p)| p)
    }
}

/// A generic AABB index parameterized by a spatial backend.
///
/// The index is built once per data generation and then queried many times per
/// frame. There is no per-entry update: call [`IndexGeneric::clear`] and
/// re-insert everything when positions change.
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T>> {
    entries: Vec<Entry<T, P>>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T> + Default,
{
    /// Create an empty index using the backend's default constructor.
    pub fn new() -> Self {
        Self::with_backend(B::default())
    }
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Create an empty index over an explicitly configured backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            entries: Vec::new(),
            backend,
        }
    }

    /// Reserve space for at least `n` entries.
    pub fn reserve(&mut self, n: usize) {
        self.entries.reserve(n);
    }

    /// Insert a new AABB with payload. Returns a `Key` valid until the next clear.
    pub fn insert(&mut self, aabb: Aabb2D<T>, payload: P) -> Key {
        let idx = self.entries.len();
        self.entries.push(Entry { aabb, payload });
        self.backend.insert(idx, aabb);
        Key::new(idx)
    }

    /// Remove every entry. Keys handed out before are invalid afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.backend.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: Key) -> Option<(Aabb2D<T>, P)> {
        self.entries.get(key.idx()).map(|e| (e.aabb, e.payload))
    }

    /// Access the backend, for diagnostics.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Query for entries whose AABB contains the point.
    pub fn query_point(&self, x: T, y: T) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_point(x, y)
            .filter_map(|i| self.entries.get(i).map(|e| (Key::new(i), e.payload)))
    }

    /// Query for entries whose AABB intersects the given rectangle.
    pub fn query_rect(&self, rect: Aabb2D<T>) -> impl Iterator<Item = (Key, P)> + '_ {
        self.backend
            .query_rect(rect)
            .filter_map(|i| self.entries.get(i).map(|e| (Key::new(i), e.payload)))
    }

    /// Query the rectangle but stop after `cap` matches.
    ///
    /// This bounds per-frame cost at any zoom level. Truncation keeps the
    /// lowest keys, which is insertion order.
    pub fn query_rect_capped(&self, rect: Aabb2D<T>, cap: usize) -> CappedQuery<P> {
        let mut it = self.query_rect(rect);
        let hits: Vec<_> = it.by_ref().take(cap).collect();
        let truncated = it.next().is_some();
        CappedQuery { hits, truncated }
    }
}

/// Default index using a flat vector backend.
pub type Index<T, P> = IndexGeneric<T, P, FlatVec<T>>;

/// Grid-backed index over `f64` layout coordinates.
pub type SpatialGrid<P> = IndexGeneric<f64, P, Grid>;

impl<T: Copy + PartialOrd + Debug, P: Copy + Debug> Default for Index<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + Debug> SpatialGrid<P> {
    /// Create a grid-backed index with square cells and the origin at zero.
    pub fn with_cell_size(cell: f64) -> Self {
        Self::with_backend(Grid::new(cell, cell, 0.0, 0.0))
    }

    /// Create a grid-backed index with explicit cell size and origin offset.
    pub fn with_uniform_grid_with_origin(
        cell_w: f64,
        cell_h: f64,
        origin_x: f64,
        origin_y: f64,
    ) -> Self {
        Self::with_backend(Grid::new(cell_w, cell_h, origin_x, origin_y))
    }

    /// Build a grid over point entries in one pass.
    pub fn from_points(cell: f64, points: impl IntoIterator<Item = (f64, f64, P)>) -> Self {
        let mut grid = Self::with_cell_size(cell);
        for (x, y, payload) in points {
            let _ = grid.insert(Aabb2D::point(x, y), payload);
        }
        grid
    }
}
