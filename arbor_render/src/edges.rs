// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batched elbow edges.

use arbor_index::{Aabb2D, SpatialGrid};
use arbor_layout::{LayoutIndices, NodeId};
use kurbo::{BezPath, Line, Rect};
use peniko::Color;

use crate::config::RenderConfig;
use crate::display::{DisplayList, DrawCmd};

/// Counts from one edge pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeStats {
    /// Segments emitted.
    pub segments: usize,
    /// Path commands emitted.
    pub paths: usize,
    /// Whether segments were dropped at the per-frame cap.
    pub truncated: bool,
}

/// Packs line segments into path commands of bounded size.
#[derive(Clone, Debug)]
pub struct EdgeBatcher {
    path: BezPath,
    in_path: usize,
    flush_every: usize,
    cap: usize,
    color: Color,
    width: f64,
    stats: EdgeStats,
}

impl EdgeBatcher {
    /// A batcher flushing every `flush_every` segments and stopping at `cap`.
    pub fn new(flush_every: usize, cap: usize, color: Color, width: f64) -> Self {
        Self {
            path: BezPath::new(),
            in_path: 0,
            flush_every: flush_every.max(1),
            cap,
            color,
            width,
            stats: EdgeStats::default(),
        }
    }

    /// A batcher using the edge settings of `config`.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(
            config.edge_flush_segments,
            config.max_edge_segments,
            config.palette.edge,
            config.edge_width,
        )
    }

    /// Add a segment. Returns false, and records truncation, once the cap is reached.
    pub fn push(&mut self, line: Line, list: &mut DisplayList) -> bool {
        if self.stats.segments >= self.cap {
            self.stats.truncated = true;
            return false;
        }
        self.path.move_to(line.p0);
        self.path.line_to(line.p1);
        self.in_path += 1;
        self.stats.segments += 1;
        if self.in_path >= self.flush_every {
            self.flush(list);
        }
        true
    }

    fn flush(&mut self, list: &mut DisplayList) {
        if self.in_path == 0 {
            return;
        }
        list.push(DrawCmd::Path {
            path: std::mem::take(&mut self.path),
            color: self.color,
            width: self.width,
        });
        self.in_path = 0;
        self.stats.paths += 1;
    }

    /// Flush the partial path and return the counts.
    pub fn finish(mut self, list: &mut DisplayList) -> EdgeStats {
        self.flush(list);
        self.stats
    }
}

/// Closed-interval overlap, so zero-width stubs still count.
fn touches(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

fn to_aabb(r: Rect) -> Aabb2D<f64> {
    Aabb2D::new(r.x0, r.y0, r.x1, r.y1)
}

/// Connection bounds of every parent, gridded once per node list.
///
/// Parents are inserted in breadth-first order, so queries return them in
/// that order and the per-frame segment cap keeps the edges nearest the root.
#[derive(Debug)]
pub struct EdgeIndex {
    grid: SpatialGrid<NodeId>,
}

impl EdgeIndex {
    /// Grid the connection below every parent of `indices`.
    pub fn build(indices: &LayoutIndices, cell_size: f64) -> Self {
        let mut grid = SpatialGrid::with_cell_size(cell_size);
        for parent in indices.parents() {
            if let Some(conn) = indices.connection(parent) {
                let _ = grid.insert(to_aabb(conn.bounds()), parent);
            }
        }
        Self { grid }
    }

    /// Number of indexed connections.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// True if no parent has children.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Parents whose connection touches `visible`, in breadth-first order.
    pub fn parents_in(&self, visible: Rect) -> impl Iterator<Item = NodeId> + '_ {
        self.grid.query_rect(to_aabb(visible)).map(|(_, parent)| parent)
    }
}

/// Draw every connection whose bounds touch `visible`, parents in BFS order.
///
/// With an [`EdgeIndex`] only the connections near `visible` are visited;
/// without one every parent is checked.
pub fn draw_edges(
    indices: &LayoutIndices,
    edges: Option<&EdgeIndex>,
    visible: Rect,
    config: &RenderConfig,
    list: &mut DisplayList,
) -> EdgeStats {
    let mut batch = EdgeBatcher::from_config(config);
    match edges {
        Some(index) => emit(indices, index.parents_in(visible), visible, &mut batch, list),
        None => emit(indices, indices.parents(), visible, &mut batch, list),
    }
    batch.finish(list)
}

fn emit(
    indices: &LayoutIndices,
    parents: impl Iterator<Item = NodeId>,
    visible: Rect,
    batch: &mut EdgeBatcher,
    list: &mut DisplayList,
) {
    for parent in parents {
        let Some(conn) = indices.connection(parent) else {
            continue;
        };
        if !touches(conn.bounds(), visible) {
            continue;
        }
        for seg in conn.segments() {
            if !batch.push(seg, list) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_layout::NodeRecord;

    fn fan(children: u64) -> LayoutIndices {
        let mut v = vec![NodeRecord::new(0, 0.0, 0.0, None, 1, "Root")];
        for i in 1..=children {
            v.push(NodeRecord::new(i, (i as f64) * 200.0, 300.0, Some(0), 2, "Kid"));
        }
        LayoutIndices::build(v).0
    }

    #[test]
    fn flushes_every_n_segments() {
        let mut list = DisplayList::default();
        let mut b = EdgeBatcher::new(50, 1500, Color::BLACK, 1.0);
        for i in 0..120 {
            let y = f64::from(i);
            assert!(b.push(Line::new((0.0, y), (1.0, y)), &mut list));
        }
        let stats = b.finish(&mut list);
        assert_eq!(stats.segments, 120);
        assert_eq!(stats.paths, 3);
        assert_eq!(list.world().len(), 3);
        assert!(!stats.truncated);
    }

    #[test]
    fn cap_truncates() {
        let mut list = DisplayList::default();
        let mut b = EdgeBatcher::new(50, 10, Color::BLACK, 1.0);
        for _ in 0..10 {
            assert!(b.push(Line::new((0.0, 0.0), (1.0, 1.0)), &mut list));
        }
        assert!(!b.push(Line::new((0.0, 0.0), (1.0, 1.0)), &mut list));
        let stats = b.finish(&mut list);
        assert_eq!(stats.segments, 10);
        assert!(stats.truncated);
    }

    #[test]
    fn only_visible_connections_are_drawn() {
        let idx = fan(3);
        let cfg = RenderConfig::default();
        // Stub + bus + three child stubs.
        let mut list = DisplayList::default();
        let all = draw_edges(&idx, None, Rect::new(-1e4, -1e4, 1e4, 1e4), &cfg, &mut list);
        assert_eq!(all.segments, 5);
        assert_eq!(all.paths, 1);

        let mut list = DisplayList::default();
        let none = draw_edges(&idx, None, Rect::new(5e3, 5e3, 6e3, 6e3), &cfg, &mut list);
        assert_eq!(none.segments, 0);
        assert!(list.is_empty());
    }

    #[test]
    fn frame_cap_applies_across_connections() {
        let idx = fan(40);
        let cfg = RenderConfig {
            max_edge_segments: 20,
            ..RenderConfig::default()
        };
        let mut list = DisplayList::default();
        let stats = draw_edges(&idx, None, Rect::new(-1e5, -1e5, 1e5, 1e5), &cfg, &mut list);
        assert_eq!(stats.segments, 20);
        assert!(stats.truncated);
    }

    /// Two families side by side, far enough apart to share no grid cell.
    fn two_fans() -> LayoutIndices {
        let mut v = vec![NodeRecord::new(0, 0.0, 0.0, None, 1, "Root")];
        for (i, x) in [-5000.0, 5000.0].into_iter().enumerate() {
            let parent = 1 + i as u64 * 10;
            v.push(NodeRecord::new(parent, x, 300.0, Some(0), 2, "Branch"));
            for j in 1..=3 {
                let kid = parent + j;
                v.push(NodeRecord::new(kid, x + (j as f64) * 200.0, 600.0, Some(parent), 3, "Kid"));
            }
        }
        LayoutIndices::build(v).0
    }

    #[test]
    fn edge_index_visits_only_nearby_parents() {
        let idx = two_fans();
        let edges = EdgeIndex::build(&idx, 512.0);
        assert_eq!(edges.len(), 3);
        let near_right = Rect::new(5000.0, 500.0, 5800.0, 700.0);
        assert_eq!(edges.parents_in(near_right).collect::<Vec<_>>(), [NodeId(11)]);
        assert_eq!(edges.parents_in(Rect::new(0.0, 5e3, 10.0, 6e3)).count(), 0);
    }

    #[test]
    fn edge_index_matches_full_scan() {
        let idx = two_fans();
        let edges = EdgeIndex::build(&idx, 512.0);
        let cfg = RenderConfig::default();
        for visible in [
            Rect::new(-1e5, -1e5, 1e5, 1e5),
            Rect::new(-5000.0, 400.0, -4000.0, 700.0),
            Rect::new(100.0, 100.0, 300.0, 200.0),
            Rect::new(9e3, 9e3, 9.5e3, 9.5e3),
        ] {
            let mut scanned = DisplayList::default();
            let mut indexed = DisplayList::default();
            let a = draw_edges(&idx, None, visible, &cfg, &mut scanned);
            let b = draw_edges(&idx, Some(&edges), visible, &cfg, &mut indexed);
            assert_eq!(a, b, "stats differ for {visible:?}");
            assert_eq!(scanned.world(), indexed.world(), "paths differ for {visible:?}");
        }
    }

    #[test]
    fn leaf_only_tree_has_empty_edge_index() {
        let idx = LayoutIndices::build(vec![NodeRecord::new(1, 0.0, 0.0, None, 1, "Solo")]).0;
        assert!(EdgeIndex::build(&idx, 512.0).is_empty());
    }
}
