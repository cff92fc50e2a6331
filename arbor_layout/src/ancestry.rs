// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walking from a node up to the root.

use alloc::vec::Vec;

use hashbrown::HashSet;
use log::warn;
use smallvec::SmallVec;

use crate::indices::LayoutIndices;
use crate::node::NodeId;

/// Hard cap on the number of father links followed.
pub const MAX_ANCESTRY_DEPTH: usize = 50;

/// Ids from the root down to a node, inclusive.
pub type AncestryPath = SmallVec<[NodeId; 16]>;

/// One parent-to-child step along an ancestry path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AncestryLink {
    /// Upper end.
    pub parent: NodeId,
    /// Lower end.
    pub child: NodeId,
    /// `child.generation - parent.generation`, at least 1.
    pub generation_gap: u32,
}

/// Walk father links from `start` using `father_of`, returning root-to-node order.
///
/// `father_of` returns `None` for ids it does not know and `Some(None)` for the
/// root. The walk stops at the root, at an unknown father, at a repeated id, or
/// after `max_depth` links, whichever comes first; in the last three cases the
/// partial path is returned and a warning is logged.
pub fn walk_ancestry(
    start: NodeId,
    max_depth: usize,
    mut father_of: impl FnMut(NodeId) -> Option<Option<NodeId>>,
) -> AncestryPath {
    let mut path = AncestryPath::new();
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut cur = start;
    if father_of(cur).is_none() {
        return path;
    }
    loop {
        if !seen.insert(cur) {
            warn!(target: "arbor::layout", "cycle through {cur} while walking ancestry of {start}");
            break;
        }
        path.push(cur);
        match father_of(cur) {
            Some(Some(f)) => {
                if path.len() > max_depth {
                    warn!(target: "arbor::layout", "ancestry of {start} exceeds {max_depth} links");
                    break;
                }
                cur = f;
            }
            Some(None) => break,
            None => {
                warn!(target: "arbor::layout", "ancestry of {start} reaches unknown node {cur}");
                path.pop();
                break;
            }
        }
    }
    path.reverse();
    path
}

impl LayoutIndices {
    /// Ids from the root down to `id`, inclusive. Empty for unknown ids.
    pub fn ancestry_path(&self, id: NodeId) -> AncestryPath {
        walk_ancestry(id, MAX_ANCESTRY_DEPTH, |n| {
            self.node(n).map(|r| r.father_id)
        })
    }

    /// Consecutive links of a path with their generation gaps.
    pub fn ancestry_links(&self, path: &[NodeId]) -> Vec<AncestryLink> {
        path.windows(2)
            .map(|w| {
                let gen_of = |id| self.node(id).map_or(0, |r| r.generation);
                AncestryLink {
                    parent: w[0],
                    child: w[1],
                    generation_gap: gen_of(w[1]).saturating_sub(gen_of(w[0])).max(1),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeRecord;
    use alloc::vec;
    use hashbrown::HashMap;

    #[test]
    fn unknown_start_is_empty() {
        let p = walk_ancestry(NodeId(9), MAX_ANCESTRY_DEPTH, |_| None);
        assert!(p.is_empty());
    }

    #[test]
    fn cycle_is_cut_at_first_repeat() {
        let fathers: HashMap<NodeId, Option<NodeId>> = [
            (NodeId(1), Some(NodeId(2))),
            (NodeId(2), Some(NodeId(3))),
            (NodeId(3), Some(NodeId(1))),
        ]
        .into_iter()
        .collect();
        let p = walk_ancestry(NodeId(1), MAX_ANCESTRY_DEPTH, |n| fathers.get(&n).copied());
        assert_eq!(p.as_slice(), [NodeId(3), NodeId(2), NodeId(1)]);
    }

    #[test]
    fn depth_cap_bounds_long_chains() {
        // A chain of 200 with node n's father being n - 1.
        let p = walk_ancestry(NodeId(199), 50, |n| {
            (n.0 < 200).then(|| n.0.checked_sub(1).map(NodeId))
        });
        assert_eq!(p.len(), 51);
        assert_eq!(p.last(), Some(&NodeId(199)));
    }

    #[test]
    fn unknown_father_drops_the_dangling_link() {
        let p = walk_ancestry(NodeId(5), MAX_ANCESTRY_DEPTH, |n| match n.0 {
            5 => Some(Some(NodeId(4))),
            4 => Some(Some(NodeId(77))),
            _ => None,
        });
        assert_eq!(p.as_slice(), [NodeId(4), NodeId(5)]);
    }

    #[test]
    fn links_carry_generation_gaps() {
        let (idx, _) = LayoutIndices::build(vec![
            NodeRecord::new(1, 0.0, 0.0, None, 1, "R"),
            NodeRecord::new(2, 0.0, 200.0, Some(1), 2, "A"),
            NodeRecord::new(3, 0.0, 400.0, Some(2), 4, "B"),
        ]);
        let path = idx.ancestry_path(NodeId(3));
        assert_eq!(path.as_slice(), [NodeId(1), NodeId(2), NodeId(3)]);
        let links = idx.ancestry_links(&path);
        assert_eq!(links[0].generation_gap, 1);
        assert_eq!(links[1].generation_gap, 2);
    }
}
