// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Derived indices over a node list: children, depths, subtree sizes, centroids, heroes.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect, Vec2};
use log::{error, warn};
use smallvec::SmallVec;

use crate::node::{NodeFlags, NodeId, NodeRecord, NodeRole};

const TARGET: &str = "arbor::layout";

/// Ordered child list. Most parents have a handful of children.
pub type Children = SmallVec<[NodeId; 4]>;

/// Number of second-generation heroes selected besides the root.
pub const SECOND_GENERATION_HEROES: usize = 2;

/// Counts of malformed input that [`LayoutIndices::build`] ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexDiagnostics {
    /// No record had `father_id == None`.
    pub missing_root: bool,
    /// Records with no father beyond the first one.
    pub extra_roots: usize,
    /// Records whose id repeated an earlier record.
    pub duplicates: usize,
    /// Records whose father id resolved to nothing.
    pub dangling: usize,
    /// Records with a resolvable father that are still cut off from the root,
    /// such as cycle members and their descendants.
    pub unreachable: usize,
}

impl IndexDiagnostics {
    /// True if nothing was ignored.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug)]
struct NodeInfo {
    slot: usize,
    role: NodeRole,
    flags: NodeFlags,
    depth: u32,
    subtree_size: u32,
    centroid: Point,
}

/// Indices derived from one node list.
///
/// Only nodes reachable from the root are indexed; everything else is counted
/// in [`IndexDiagnostics`] and otherwise ignored. Rebuild wholesale whenever the
/// node list changes.
#[derive(Clone, Debug, Default)]
pub struct LayoutIndices {
    records: Vec<NodeRecord>,
    info: HashMap<NodeId, NodeInfo>,
    children: HashMap<NodeId, Children>,
    order: Vec<NodeId>,
    root: Option<NodeId>,
    heroes: SmallVec<[NodeId; 3]>,
    bounds: Option<Rect>,
}

impl LayoutIndices {
    /// Build indices from a node list.
    ///
    /// Never fails: a missing root yields empty indices, and malformed records
    /// are skipped. Both are logged and counted in the returned diagnostics.
    pub fn build(records: Vec<NodeRecord>) -> (Self, IndexDiagnostics) {
        let mut diag = IndexDiagnostics::default();

        // Canonical slot per id; first occurrence wins.
        let mut slots: HashMap<NodeId, usize> = HashMap::with_capacity(records.len());
        let mut root: Option<NodeId> = None;
        for (slot, r) in records.iter().enumerate() {
            if slots.contains_key(&r.id) {
                warn!(target: TARGET, "duplicate node id {}; keeping the first record", r.id);
                diag.duplicates += 1;
                continue;
            }
            if r.is_root() {
                if let Some(first) = root {
                    warn!(target: TARGET, "extra root {} ignored; root is {first}", r.id);
                    diag.extra_roots += 1;
                    continue;
                }
                root = Some(r.id);
            }
            slots.insert(r.id, slot);
        }

        let Some(root) = root else {
            error!(target: TARGET, "no root among {} records; nothing will be drawn", records.len());
            diag.missing_root = true;
            return (Self::default(), diag);
        };

        let mut children: HashMap<NodeId, Children> = HashMap::new();
        for (&id, &slot) in &slots {
            let Some(father) = records[slot].father_id else {
                continue;
            };
            if slots.contains_key(&father) {
                children.entry(father).or_default().push(id);
            } else {
                warn!(target: TARGET, "node {id} names missing father {father}");
                diag.dangling += 1;
            }
        }
        for kids in children.values_mut() {
            kids.sort_by(|a, b| {
                let (ra, rb) = (&records[slots[a]], &records[slots[b]]);
                ra.x.total_cmp(&rb.x).then(a.cmp(b))
            });
        }

        // Breadth-first from the root fills depths and the visit order.
        let mut depths: HashMap<NodeId, u32> = HashMap::with_capacity(slots.len());
        let mut order = Vec::with_capacity(slots.len());
        depths.insert(root, 0);
        order.push(root);
        let mut head = 0;
        while let Some(&id) = order.get(head) {
            head += 1;
            let d = depths[&id];
            if let Some(kids) = children.get(&id) {
                for &c in kids {
                    if !depths.contains_key(&c) {
                        depths.insert(c, d + 1);
                        order.push(c);
                    }
                }
            }
        }

        let unreachable = slots.len().saturating_sub(order.len() + diag.dangling);
        if unreachable > 0 {
            warn!(target: TARGET, "{unreachable} nodes are not reachable from root {root}");
            diag.unreachable = unreachable;
        }
        // Parents outside the reachable tree keep no child lists.
        children.retain(|id, _| depths.contains_key(id));

        let mut info: HashMap<NodeId, NodeInfo> = HashMap::with_capacity(order.len());
        let mut bounds: Option<Rect> = None;
        for &id in &order {
            let slot = slots[&id];
            let r = &records[slot];
            let has_children = children.get(&id).is_some_and(|k| !k.is_empty());
            let role = NodeRole::classify(r, has_children);
            let rect = role.display_rect(r);
            bounds = Some(bounds.map_or(rect, |b| b.union(rect)));
            let mut flags = NodeFlags::empty();
            flags.set(NodeFlags::ROOT, id == root);
            flags.set(NodeFlags::HAS_CHILDREN, has_children);
            flags.set(NodeFlags::HAS_PHOTO, r.photo_url.is_some());
            info.insert(
                id,
                NodeInfo {
                    slot,
                    role,
                    flags,
                    depth: depths[&id],
                    subtree_size: 1,
                    centroid: rect.center(),
                },
            );
        }

        // Post-order with an explicit stack: sizes and center sums flow upward.
        let mut sums: HashMap<NodeId, Vec2> = HashMap::with_capacity(order.len());
        let mut stack: Vec<(NodeId, bool)> = Vec::with_capacity(64);
        stack.push((root, false));
        while let Some((id, expanded)) = stack.pop() {
            if !expanded {
                stack.push((id, true));
                if let Some(kids) = children.get(&id) {
                    stack.extend(kids.iter().rev().map(|&c| (c, false)));
                }
                continue;
            }
            let mut size = 1_u32;
            let mut sum = info[&id].centroid.to_vec2();
            if let Some(kids) = children.get(&id) {
                for c in kids {
                    size += info[c].subtree_size;
                    sum += sums[c];
                }
            }
            sums.insert(id, sum);
            if let Some(n) = info.get_mut(&id) {
                n.subtree_size = size;
                n.centroid = (sum / f64::from(size)).to_point();
            }
        }

        let mut indices = Self {
            records,
            info,
            children,
            order,
            root: Some(root),
            heroes: SmallVec::new(),
            bounds,
        };
        indices.select_heroes();
        (indices, diag)
    }

    fn select_heroes(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        let mut candidates: Vec<(u32, NodeId)> = self
            .info
            .iter()
            .filter(|(_, n)| n.role == NodeRole::SecondGeneration)
            .map(|(&id, n)| (n.subtree_size, id))
            .collect();
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        self.heroes.clear();
        self.heroes.push(root);
        self.heroes.extend(
            candidates
                .into_iter()
                .take(SECOND_GENERATION_HEROES)
                .map(|(_, id)| id),
        );
        for id in self.heroes.clone() {
            if let Some(n) = self.info.get_mut(&id) {
                n.flags.insert(NodeFlags::HERO);
            }
        }
    }

    /// The root, if the list had one.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of indexed (reachable) nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `id` is an indexed node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.info.contains_key(&id)
    }

    /// Indexed nodes in breadth-first order from the root.
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// The record for an indexed node.
    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.info.get(&id).and_then(|n| self.records.get(n.slot))
    }

    /// Children ordered by ascending `x`, then id. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(|k| k.as_slice()).unwrap_or(&[])
    }

    /// Parents that have at least one child, in breadth-first order.
    pub fn parents(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order
            .iter()
            .copied()
            .filter(|id| !self.children(*id).is_empty())
    }

    /// Breadth-first distance from the root (root = 0).
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.info.get(&id).map(|n| n.depth)
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`.
    pub fn subtree_size(&self, id: NodeId) -> Option<u32> {
        self.info.get(&id).map(|n| n.subtree_size)
    }

    /// Average box center of `id` and all its descendants.
    pub fn centroid(&self, id: NodeId) -> Option<Point> {
        self.info.get(&id).map(|n| n.centroid)
    }

    /// Role of an indexed node.
    pub fn role(&self, id: NodeId) -> Option<NodeRole> {
        self.info.get(&id).map(|n| n.role)
    }

    /// Derived flags of an indexed node.
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.info.get(&id).map_or(NodeFlags::empty(), |n| n.flags)
    }

    /// Display box of an indexed node.
    pub fn display_rect(&self, id: NodeId) -> Option<Rect> {
        let n = self.info.get(&id)?;
        Some(n.role.display_rect(self.records.get(n.slot)?))
    }

    /// The root followed by up to two second-generation nodes with children,
    /// largest subtree first.
    pub fn heroes(&self) -> &[NodeId] {
        &self.heroes
    }

    /// Union of every indexed display box.
    pub fn tree_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Union of the display boxes of `id` and all its descendants.
    pub fn subtree_bounds(&self, id: NodeId) -> Option<Rect> {
        let mut acc = self.display_rect(id)?;
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        while let Some(n) = stack.pop() {
            if let Some(r) = self.display_rect(n) {
                acc = acc.union(r);
            }
            stack.extend_from_slice(self.children(n));
        }
        Some(acc)
    }

    /// Whether `id` has an indexed ancestor set containing `ancestor`.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut cur = self.node(id).and_then(|r| r.father_id);
        while let Some(f) = cur {
            if f == ancestor {
                return true;
            }
            if !seen.insert(f) {
                return false;
            }
            cur = self.node(f).and_then(|r| r.father_id);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rec(id: u64, x: f64, father: Option<u64>, generation: u32) -> NodeRecord {
        NodeRecord::new(id, x, f64::from(generation) * 200.0, father, generation, "N")
    }

    #[test]
    fn missing_root_yields_empty_indices() {
        let (idx, diag) = LayoutIndices::build(vec![rec(2, 0.0, Some(1), 2)]);
        assert!(idx.is_empty());
        assert!(diag.missing_root);
        assert_eq!(idx.root(), None);
        assert_eq!(idx.tree_bounds(), None);
    }

    #[test]
    fn children_are_ordered_by_x_then_id() {
        let (idx, diag) = LayoutIndices::build(vec![
            rec(1, 0.0, None, 1),
            rec(5, 300.0, Some(1), 2),
            rec(4, 100.0, Some(1), 2),
            rec(3, 300.0, Some(1), 2),
        ]);
        assert!(diag.is_clean());
        assert_eq!(idx.children(NodeId(1)), [NodeId(4), NodeId(3), NodeId(5)]);
        assert!(idx.children(NodeId(4)).is_empty());
    }

    #[test]
    fn malformed_records_are_counted_and_skipped() {
        let (idx, diag) = LayoutIndices::build(vec![
            rec(1, 0.0, None, 1),
            rec(2, 0.0, Some(1), 2),
            rec(2, 50.0, Some(1), 2),
            rec(9, 0.0, None, 1),
            rec(3, 0.0, Some(42), 3),
            // 7 and 8 form a cycle off to the side.
            rec(7, 0.0, Some(8), 3),
            rec(8, 0.0, Some(7), 3),
        ]);
        assert_eq!(diag.duplicates, 1);
        assert_eq!(diag.extra_roots, 1);
        assert_eq!(diag.dangling, 1);
        assert_eq!(diag.unreachable, 2);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.node(NodeId(2)).map(|r| r.x), Some(0.0));
        assert!(!idx.contains(NodeId(7)));
        assert!(idx.children(NodeId(7)).is_empty());
    }

    #[test]
    fn centroid_averages_box_centers() {
        // Root 240x120 at origin, one plain child 160x72 at (400, 400).
        let (idx, _) = LayoutIndices::build(vec![
            NodeRecord::new(1, 0.0, 0.0, None, 1, "Root"),
            NodeRecord::new(2, 400.0, 400.0, Some(1), 3, "Leaf"),
        ]);
        let c = idx.centroid(NodeId(1)).unwrap();
        assert_eq!(c, Point::new((120.0 + 480.0) / 2.0, (60.0 + 436.0) / 2.0));
        assert_eq!(idx.centroid(NodeId(2)), Some(Point::new(480.0, 436.0)));
    }

    #[test]
    fn heroes_prefer_larger_subtrees_then_lower_ids() {
        let mut nodes = vec![rec(1, 0.0, None, 1)];
        // Three second-generation parents: 10 has 2 kids, 20 and 30 have 3 each.
        for (parent, kids) in [(10, 2_u64), (20, 3), (30, 3)] {
            nodes.push(rec(parent, parent as f64, Some(1), 2));
            for k in 0..kids {
                nodes.push(rec(parent * 10 + k, 0.0, Some(parent), 3));
            }
        }
        // A childless second-generation node is never a hero.
        nodes.push(rec(40, 40.0, Some(1), 2));
        let (idx, _) = LayoutIndices::build(nodes);
        assert_eq!(idx.heroes(), [NodeId(1), NodeId(20), NodeId(30)]);
        assert!(idx.flags(NodeId(20)).contains(NodeFlags::HERO));
        assert!(!idx.flags(NodeId(10)).contains(NodeFlags::HERO));
        assert_eq!(idx.role(NodeId(40)), Some(NodeRole::Plain));
    }

    #[test]
    fn subtree_bounds_cover_descendants_only() {
        let (idx, _) = LayoutIndices::build(vec![
            NodeRecord::new(1, 0.0, 0.0, None, 1, "R"),
            NodeRecord::new(2, -500.0, 200.0, Some(1), 2, "A"),
            NodeRecord::new(3, 500.0, 200.0, Some(1), 2, "B"),
            NodeRecord::new(4, -600.0, 400.0, Some(2), 3, "C"),
        ]);
        let a = idx.subtree_bounds(NodeId(2)).unwrap();
        assert_eq!(a, Rect::new(-600.0, 200.0, -280.0, 472.0));
        let all = idx.tree_bounds().unwrap();
        assert_eq!(all, Rect::new(-600.0, 0.0, 660.0, 472.0));
        assert!(idx.is_descendant_of(NodeId(4), NodeId(1)));
        assert!(!idx.is_descendant_of(NodeId(4), NodeId(3)));
    }
}
