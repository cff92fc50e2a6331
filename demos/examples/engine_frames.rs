// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive an engine through a short session and print each committed frame.
//!
//! Run:
//! - `cargo run -p arbor_demos --example engine_frames`

use arbor_engine::{Engine, EngineConfig, Frame};
use arbor_layout::{NodeId, NodeRecord};
use arbor_render::DrawCmd;
use arbor_view::GestureInput;
use kurbo::{Point, Size};

fn family() -> Vec<NodeRecord> {
    let mut v = vec![NodeRecord::new(1, 0.0, 0.0, None, 1, "Amara Okafor").with_photo("amara.jpg")];
    let mut next = 2;
    for (i, child) in ["Bisi", "Chidi", "Dayo"].into_iter().enumerate() {
        let cid = next;
        next += 1;
        v.push(NodeRecord::new(
            cid,
            i as f64 * 600.0 - 600.0,
            300.0,
            Some(1),
            2,
            format!("{child} Okafor"),
        ));
        for j in 0..3 {
            v.push(
                NodeRecord::new(
                    next,
                    i as f64 * 600.0 - 800.0 + j as f64 * 200.0,
                    600.0,
                    Some(cid),
                    3,
                    format!("Grandchild {next}"),
                )
                .with_photo(format!("gc/{next}.jpg")),
            );
            next += 1;
        }
    }
    v
}

fn main() {
    let mut engine = Engine::new(EngineConfig {
        debug_overlay: true,
        ..EngineConfig::default()
    });
    engine.set_viewport(Size::new(800.0, 1200.0), 2.0);
    engine.set_selection_handler(Box::new(|id| println!("  host: selected {id}")));
    engine.load_nodes(family());

    let mut now = 0;
    print_frame(engine.tick(now));

    // Tap the root card.
    let root = engine.camera().world_to_screen(Point::new(120.0, 60.0));
    engine.handle_gesture(GestureInput::Tap { position: root }, now);
    now += 16;
    print_frame(engine.tick(now));

    // Fly to a grandchild and run the animation out.
    if let Some(target) = engine.navigate_to(NodeId(13), now) {
        println!("  navigating to {target:?}");
    }
    for _ in 0..60 {
        now += 16;
        print_frame(engine.tick(now));
    }

    // Pinch out until the cards collapse to pills.
    let focal = Point::new(400.0, 600.0);
    engine.handle_gesture(GestureInput::PinchBegin { focal }, now);
    for step in 1..=20 {
        now += 16;
        let scale = 1.0 - f64::from(step) * 0.04;
        engine.handle_gesture(GestureInput::PinchUpdate { focal, scale }, now);
        print_frame(engine.tick(now));
    }
    engine.handle_gesture(GestureInput::PinchEnd, now);

    for event in engine.drain_events() {
        println!("event: {event:?}");
    }
}

fn print_frame(frame: Option<&Frame>) {
    let Some(frame) = frame else {
        return;
    };
    let mut fills = 0;
    let mut paths = 0;
    let mut glows = 0;
    let mut texts = 0;
    for cmd in frame.list.world() {
        match cmd {
            DrawCmd::Fill { .. } | DrawCmd::Stroke { .. } => fills += 1,
            DrawCmd::Path { .. } => paths += 1,
            DrawCmd::Glow { .. } => glows += 1,
            DrawCmd::Text { .. } => texts += 1,
            DrawCmd::Image(_) => {}
        }
    }
    println!(
        "v{:<3} {:?}: {} visible, {fills} shapes, {paths} edge paths, {glows} glow, {texts} texts, {} images",
        frame.snapshot.version,
        frame.reason,
        frame.visible.len(),
        frame.list.image_requests().count(),
    );
    if let Some(overlay) = &frame.overlay {
        println!("     {}", overlay.lines().join(" | "));
    }
}
