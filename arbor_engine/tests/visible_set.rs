// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-set queries against a generated 500-node tree.

use std::collections::HashSet;

use arbor_engine::{Engine, Frame, Scene, query_rect};
use arbor_layout::{LayoutIndices, NodeId, NodeRecord, fanout_tree};
use arbor_view::GestureInput;
use kurbo::{Point, Rect, Size};

fn ternary(n: usize) -> Vec<NodeRecord> {
    fanout_tree(n, 3, 200.0)
}

/// Every node whose display box meets `world`, edges inclusive.
fn brute_force(idx: &LayoutIndices, world: Rect) -> HashSet<NodeId> {
    idx.ids()
        .iter()
        .copied()
        .filter(|&id| {
            let r = idx.display_rect(id).unwrap();
            r.x0 <= world.x1 && world.x0 <= r.x1 && r.y0 <= world.y1 && world.y0 <= r.y1
        })
        .collect()
}

fn check_frame(e: &Engine, frame: &Frame) {
    let world = query_rect(
        frame.snapshot.stage,
        frame.snapshot.viewport,
        e.config().grid.margin_px,
    );
    let expected = brute_force(e.scene().indices(), world);
    let got: HashSet<NodeId> = frame.visible.iter().copied().collect();
    assert_eq!(got.len(), frame.visible.len(), "duplicate ids");
    assert_eq!(got, expected);
    assert!(!frame.stats.truncated_nodes);
}

fn engine() -> Engine {
    let mut e = Engine::default();
    e.set_viewport(Size::new(800.0, 600.0), 1.0);
    e.load_nodes(ternary(500));
    e
}

#[test]
fn first_frame_matches_brute_force() {
    let mut e = engine();
    let frame = e.tick(0).unwrap().clone();
    assert!(!frame.visible.is_empty());
    assert!(frame.visible.contains(&NodeId(1)));
    check_frame(&e, &frame);
}

#[test]
fn visible_set_tracks_a_drag() {
    let mut e = engine();
    e.tick(0);
    let mut now = 0;
    let mut finger = Point::new(400.0, 300.0);
    e.handle_gesture(GestureInput::PanBegin { position: finger }, now);
    let mut commits = 0;
    for _ in 0..60 {
        now += 16;
        finger.x -= 23.0;
        finger.y -= 11.0;
        e.handle_gesture(GestureInput::PanUpdate { position: finger }, now);
        if let Some(frame) = e.tick(now).cloned() {
            commits += 1;
            check_frame(&e, &frame);
        }
    }
    assert!(commits > 5, "only {commits} commits");
}

#[test]
fn capped_query_keeps_breadth_first_prefix() {
    let scene = Scene::build(ternary(500), 512.0, 1);
    let all = Rect::new(-1e6, -1e6, 1e6, 1e6);

    let capped = scene.visible(all, 400);
    assert!(capped.truncated);
    assert_eq!(capped.ids.as_slice(), &scene.indices().ids()[..400]);

    let full = scene.visible(all, 1000);
    assert!(!full.truncated);
    assert_eq!(full.ids.len(), 500);
}

#[test]
fn far_away_query_is_empty() {
    let scene = Scene::build(ternary(500), 512.0, 1);
    let bounds = scene.tree_bounds().unwrap();
    let away = Rect::new(bounds.x1 + 10.0, 0.0, bounds.x1 + 500.0, 500.0);
    let v = scene.visible(away, 400);
    assert!(v.ids.is_empty());
    assert!(!v.truncated);
}
