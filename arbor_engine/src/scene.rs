// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indices and spatial grid for one node list.

use arbor_index::{Aabb2D, SpatialGrid};
use arbor_layout::{IndexDiagnostics, LayoutIndices, NodeId, NodeRecord};
use arbor_render::EdgeIndex;
use arbor_view::Stage;
use kurbo::{Point, Rect, Size};
use log::{debug, warn};

use crate::TARGET;

/// Result of a visible-set query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSet {
    /// Ids in insertion (BFS) order.
    pub ids: Vec<NodeId>,
    /// Whether the query hit its cap.
    pub truncated: bool,
}

/// Layout-space rectangle covered by the viewport plus `margin_px` on each side.
pub fn query_rect(stage: Stage, viewport: Size, margin_px: f64) -> Rect {
    let m = margin_px.max(0.0) / stage.safe_scale();
    stage.visible_world_rect(viewport).inflate(m, m)
}

fn to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Everything derived from one node list.
///
/// Display boxes are inserted into the grid in BFS order, so a capped query
/// keeps the nodes closest to the root.
#[derive(Debug)]
pub struct Scene {
    indices: LayoutIndices,
    grid: SpatialGrid<NodeId>,
    edges: EdgeIndex,
    diagnostics: IndexDiagnostics,
    generation: u64,
}

impl Scene {
    /// A scene with no nodes.
    pub fn empty(cell_size: f64) -> Self {
        let indices = LayoutIndices::default();
        Self {
            edges: EdgeIndex::build(&indices, cell_size),
            indices,
            grid: SpatialGrid::with_cell_size(cell_size),
            diagnostics: IndexDiagnostics::default(),
            generation: 0,
        }
    }

    /// Index `records` and grid their display boxes.
    pub fn build(records: Vec<NodeRecord>, cell_size: f64, generation: u64) -> Self {
        let input = records.len();
        let (indices, diagnostics) = LayoutIndices::build(records);
        if !diagnostics.is_clean() {
            warn!(target: TARGET, "node list {generation} has problems: {diagnostics:?}");
        }
        let mut grid = SpatialGrid::with_cell_size(cell_size);
        grid.reserve(indices.len());
        for &id in indices.ids() {
            if let Some(r) = indices.display_rect(id) {
                let _ = grid.insert(to_aabb(r), id);
            }
        }
        let edges = EdgeIndex::build(&indices, cell_size);
        debug!(
            target: TARGET,
            "scene {generation}: {} of {input} records indexed, {} connections",
            indices.len(),
            edges.len()
        );
        Self {
            indices,
            grid,
            edges,
            diagnostics,
            generation,
        }
    }

    /// Derived indices.
    pub fn indices(&self) -> &LayoutIndices {
        &self.indices
    }

    /// Spatial grid of display boxes.
    pub fn grid(&self) -> &SpatialGrid<NodeId> {
        &self.grid
    }

    /// Spatial grid of parent-to-children connections.
    pub fn edges(&self) -> &EdgeIndex {
        &self.edges
    }

    /// Problems found while indexing.
    pub fn diagnostics(&self) -> &IndexDiagnostics {
        &self.diagnostics
    }

    /// Reload counter the scene was built for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Union of display boxes, or `None` when empty.
    pub fn tree_bounds(&self) -> Option<Rect> {
        self.indices.tree_bounds()
    }

    /// Nodes whose display box meets `world`, at most `cap` of them.
    pub fn visible(&self, world: Rect, cap: usize) -> VisibleSet {
        let q = self.grid.query_rect_capped(to_aabb(world), cap);
        VisibleSet {
            ids: q.payloads().copied().collect(),
            truncated: q.truncated,
        }
    }

    /// Topmost node whose display box contains `world`.
    ///
    /// Later BFS entries are drawn on top, so the highest key wins.
    pub fn node_at(&self, world: Point) -> Option<NodeId> {
        self.grid
            .query_point(world.x, world.y)
            .max_by_key(|&(k, _)| k)
            .map(|(_, id)| id)
    }
}
