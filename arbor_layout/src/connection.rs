// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elbow routing between a parent and its ordered children.
//!
//! Every connection is drawn as a vertical stub down from the parent's bottom
//! center, a horizontal bus halfway to the nearest child row, and a vertical
//! stub down to each child's top center.

use kurbo::{Line, Point, Rect};
use smallvec::SmallVec;

use crate::indices::LayoutIndices;
use crate::node::NodeId;

/// A parent with its children, reduced to anchor points.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    /// The parent.
    pub parent: NodeId,
    /// Bottom center of the parent box.
    pub parent_anchor: Point,
    /// Height of the horizontal bus.
    pub bus_y: f64,
    /// Children in display order with the top center of each box.
    pub children: SmallVec<[(NodeId, Point); 4]>,
}

impl Connection {
    /// Smallest rectangle containing every segment.
    pub fn bounds(&self) -> Rect {
        let mut r = Rect::from_points(self.parent_anchor, Point::new(self.parent_anchor.x, self.bus_y));
        for &(_, p) in &self.children {
            r = r.union(Rect::from_points(Point::new(p.x, self.bus_y), p));
        }
        r
    }

    /// Segments in drawing order: parent stub, bus, child stubs.
    ///
    /// A zero-length bus (one child straight below) is omitted.
    pub fn segments(&self) -> SmallVec<[Line; 8]> {
        let mut out = SmallVec::new();
        let px = self.parent_anchor.x;
        out.push(Line::new(self.parent_anchor, (px, self.bus_y)));
        let (lo, hi) = self
            .children
            .iter()
            .fold((px, px), |(lo, hi), &(_, p)| (lo.min(p.x), hi.max(p.x)));
        if hi > lo {
            out.push(Line::new((lo, self.bus_y), (hi, self.bus_y)));
        }
        for &(_, p) in &self.children {
            out.push(Line::new((p.x, self.bus_y), p));
        }
        out
    }
}

fn bottom_center(r: Rect) -> Point {
    Point::new(r.center().x, r.y1)
}

fn top_center(r: Rect) -> Point {
    Point::new(r.center().x, r.y0)
}

impl LayoutIndices {
    /// The connection below `parent`, or `None` for leaves and unknown ids.
    pub fn connection(&self, parent: NodeId) -> Option<Connection> {
        let kids = self.children(parent);
        if kids.is_empty() {
            return None;
        }
        let parent_anchor = bottom_center(self.display_rect(parent)?);
        let children: SmallVec<[(NodeId, Point); 4]> = kids
            .iter()
            .filter_map(|&c| Some((c, top_center(self.display_rect(c)?))))
            .collect();
        let nearest_top = children
            .iter()
            .map(|&(_, p)| p.y)
            .fold(f64::INFINITY, f64::min);
        Some(Connection {
            parent,
            parent_anchor,
            bus_y: parent_anchor.y + (nearest_top - parent_anchor.y) * 0.5,
            children,
        })
    }

    /// The three elbow segments from `parent` down to one `child`.
    pub fn elbow(&self, parent: NodeId, child: NodeId) -> Option<[Line; 3]> {
        let a = bottom_center(self.display_rect(parent)?);
        let b = top_center(self.display_rect(child)?);
        let bus_y = a.y + (b.y - a.y) * 0.5;
        Some([
            Line::new(a, (a.x, bus_y)),
            Line::new((a.x, bus_y), (b.x, bus_y)),
            Line::new((b.x, bus_y), b),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeRecord;
    use alloc::vec;

    fn family() -> LayoutIndices {
        LayoutIndices::build(vec![
            // Root 240x120 at origin: bottom center (120, 120).
            NodeRecord::new(1, 0.0, 0.0, None, 1, "R"),
            // Plain 160x72 children at y = 200: top centers (80, 200) and (480, 200).
            NodeRecord::new(2, 0.0, 200.0, Some(1), 3, "A"),
            NodeRecord::new(3, 400.0, 200.0, Some(1), 3, "B"),
        ])
        .0
    }

    #[test]
    fn bus_sits_halfway_to_children() {
        let idx = family();
        let c = idx.connection(NodeId(1)).unwrap();
        assert_eq!(c.parent_anchor, Point::new(120.0, 120.0));
        assert_eq!(c.bus_y, 160.0);
        assert_eq!(c.children.len(), 2);
        assert_eq!(c.bounds(), Rect::new(80.0, 120.0, 480.0, 200.0));
        assert!(idx.connection(NodeId(2)).is_none());
    }

    #[test]
    fn segments_are_stub_bus_stubs() {
        let idx = family();
        let segs = idx.connection(NodeId(1)).unwrap().segments();
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[1], Line::new((80.0, 160.0), (480.0, 160.0)));
    }

    #[test]
    fn elbow_joins_parent_and_child() {
        let idx = family();
        let [a, _, c] = idx.elbow(NodeId(1), NodeId(3)).unwrap();
        assert_eq!(a.p0, Point::new(120.0, 120.0));
        assert_eq!(c.p1, Point::new(480.0, 200.0));
    }
}
