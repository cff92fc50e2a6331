// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend. Buckets slots by integer cell for near-constant-time
//! range queries over `f64` layout coordinates.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Integer cell coordinate: `(floor((x - origin_x) / cell_w), floor((y - origin_y) / cell_h))`.
pub type CellKey = (i64, i64);

/// Uniform grid backend.
///
/// Cells are stored sparsely, so only occupied cells cost memory. Range
/// queries visit whichever is smaller: the cells covered by the query
/// rectangle or the set of occupied cells. A zoomed-out viewport spanning
/// millions of empty cells therefore costs no more than a full scan of the
/// occupied ones.
pub struct Grid {
    cell_w: f64,
    cell_h: f64,
    origin_x: f64,
    origin_y: f64,
    entries: Vec<Option<Aabb2D<f64>>>,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl Grid {
    /// Smallest accepted cell edge; smaller requests are clamped up to this.
    pub const MIN_CELL: f64 = 1.0;

    /// Create a grid backend with the given cell size and origin offset.
    ///
    /// Non-finite or tiny cell sizes are clamped to [`Grid::MIN_CELL`].
    pub fn new(cell_w: f64, cell_h: f64, origin_x: f64, origin_y: f64) -> Self {
        Self {
            cell_w: sanitize_cell(cell_w),
            cell_h: sanitize_cell(cell_h),
            origin_x,
            origin_y,
            entries: Vec::new(),
            cells: HashMap::new(),
        }
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell edge lengths `(w, h)`.
    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_w, self.cell_h)
    }

    #[inline]
    fn floor_to_i64(v: f64) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell coordinates saturate at the i64 range, far beyond any layout."
        )]
        let i = v as i64;
        if (i as f64) > v { i - 1 } else { i }
    }

    /// The cell containing the point.
    pub fn key_for(&self, x: f64, y: f64) -> CellKey {
        let cx = Self::floor_to_i64((x - self.origin_x) / self.cell_w);
        let cy = Self::floor_to_i64((y - self.origin_y) / self.cell_h);
        (cx, cy)
    }

    fn cell_span(&self, a: &Aabb2D<f64>) -> (CellKey, CellKey) {
        (self.key_for(a.min_x, a.min_y), self.key_for(a.max_x, a.max_y))
    }

    /// Number of cells spanned by the inclusive key range, saturating.
    fn span_len(lo: CellKey, hi: CellKey) -> u128 {
        let w = (i128::from(hi.0) - i128::from(lo.0) + 1).max(0);
        let h = (i128::from(hi.1) - i128::from(lo.1) + 1).max(0);
        w.unsigned_abs().saturating_mul(h.unsigned_abs())
    }

    fn collect_rect(&self, rect: &Aabb2D<f64>, out: &mut BTreeSet<usize>) {
        let (lo, hi) = self.cell_span(rect);
        let mut push_cell = |slots: &Vec<usize>| {
            for &s in slots {
                if let Some(Some(a)) = self.entries.get(s)
                    && a.overlaps(rect)
                {
                    out.insert(s);
                }
            }
        };
        let occupied = self.cells.len() as u128;
        if Self::span_len(lo, hi) > occupied {
            for (&(cx, cy), slots) in &self.cells {
                if cx >= lo.0 && cx <= hi.0 && cy >= lo.1 && cy <= hi.1 {
                    push_cell(slots);
                }
            }
        } else {
            for cy in lo.1..=hi.1 {
                for cx in lo.0..=hi.0 {
                    if let Some(slots) = self.cells.get(&(cx, cy)) {
                        push_cell(slots);
                    }
                }
            }
        }
    }
}

fn sanitize_cell(v: f64) -> f64 {
    if v.is_finite() && v >= Grid::MIN_CELL {
        v
    } else {
        Grid::MIN_CELL
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(512.0, 512.0, 0.0, 0.0)
    }
}

impl Backend<f64> for Grid {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<f64>) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(aabb);
        let (lo, hi) = self.cell_span(&aabb);
        for cy in lo.1..=hi.1 {
            for cx in lo.0..=hi.0 {
                self.cells.entry((cx, cy)).or_default().push(slot);
            }
        }
    }
    fn clear(&mut self) {
        self.entries.clear();
        self.cells.clear();
    }
    fn query_point<'a>(&'a self, x: f64, y: f64) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut set = BTreeSet::new();
        if let Some(slots) = self.cells.get(&self.key_for(x, y)) {
            for &s in slots {
                if let Some(Some(a)) = self.entries.get(s)
                    && a.contains_point(x, y)
                {
                    set.insert(s);
                }
            }
        }
        Box::new(set.into_iter())
    }
    fn query_rect<'a>(&'a self, rect: Aabb2D<f64>) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut set = BTreeSet::new();
        if !rect.is_empty() {
            self.collect_rect(&rect, &mut set);
        }
        Box::new(set.into_iter())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.entries.len();
        let alive = self.entries.iter().filter(|e| e.is_some()).count();
        f.debug_struct("Grid")
            .field("cell_w", &self.cell_w)
            .field("cell_h", &self.cell_h)
            .field("origin_x", &self.origin_x)
            .field("origin_y", &self.origin_y)
            .field("total_slots", &total)
            .field("alive", &alive)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}
