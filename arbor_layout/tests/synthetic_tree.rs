// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties of indices built over a generated 500-node tree.

use std::collections::HashSet;

use arbor_layout::{LayoutIndices, NodeId, NodeRecord, NodeRole, fanout_tree};

fn ternary(n: usize) -> Vec<NodeRecord> {
    fanout_tree(n, 3, 200.0)
}

#[test]
fn depths_follow_fathers() {
    let records = ternary(500);
    let (idx, diag) = LayoutIndices::build(records.clone());
    assert!(diag.is_clean());
    assert_eq!(idx.len(), 500);
    let root = idx.root().unwrap();
    assert_eq!(idx.depth(root), Some(0));
    for r in &records {
        if let Some(f) = r.father_id {
            assert_eq!(idx.depth(r.id), idx.depth(f).map(|d| d + 1), "node {}", r.id);
        }
    }
}

#[test]
fn subtree_sizes_sum_over_children() {
    let (idx, _) = LayoutIndices::build(ternary(500));
    assert_eq!(idx.subtree_size(idx.root().unwrap()), Some(500));
    for &id in idx.ids() {
        let kids: u32 = idx
            .children(id)
            .iter()
            .map(|&c| idx.subtree_size(c).unwrap())
            .sum();
        assert_eq!(idx.subtree_size(id), Some(1 + kids), "node {id}");
    }
}

#[test]
fn depth_five_leaf_has_six_step_path() {
    let (idx, _) = LayoutIndices::build(ternary(500));
    let leaf = idx
        .ids()
        .iter()
        .copied()
        .find(|&id| idx.depth(id) == Some(5) && idx.children(id).is_empty())
        .unwrap();
    let path = idx.ancestry_path(leaf);
    assert_eq!(path.len(), 6);
    assert_eq!(path.first().copied(), idx.root());
    assert_eq!(path.last().copied(), Some(leaf));
    let unique: HashSet<NodeId> = path.iter().copied().collect();
    assert_eq!(unique.len(), 6);
    for (i, id) in path.iter().enumerate() {
        assert_eq!(idx.depth(*id).map(|d| d as usize), Some(i));
    }
}

#[test]
fn heroes_are_root_and_two_largest_branches() {
    let (idx, _) = LayoutIndices::build(ternary(500));
    // Ids 2, 3, 4 are the second generation; lower ids fill first so 2 and 3 are biggest.
    assert_eq!(idx.heroes(), [NodeId(1), NodeId(2), NodeId(3)]);
    assert_eq!(idx.role(NodeId(2)), Some(NodeRole::SecondGeneration));
    assert!(idx.subtree_size(NodeId(2)) >= idx.subtree_size(NodeId(4)));
}

#[test]
fn bounds_contain_every_box() {
    let (idx, _) = LayoutIndices::build(ternary(500));
    let bounds = idx.tree_bounds().unwrap();
    for &id in idx.ids() {
        let r = idx.display_rect(id).unwrap();
        assert_eq!(bounds.union(r), bounds);
    }
    assert_eq!(idx.subtree_bounds(idx.root().unwrap()), Some(bounds));
}

#[test]
fn rebuild_after_reload_replaces_everything() {
    let (first, _) = LayoutIndices::build(ternary(500));
    let (second, _) = LayoutIndices::build(ternary(40));
    assert_eq!(first.len(), 500);
    assert_eq!(second.len(), 40);
    assert!(!second.contains(NodeId(41)));
}
