// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag, fling, and overscroll a camera over a wide tree, printing the stage per frame.
//!
//! Run:
//! - `cargo run -p arbor_demos --example camera_fling`

use arbor_view::{CameraConfig, CameraController, GestureInput, center_on_stage};
use kurbo::{Point, Rect, Size, Vec2};

fn main() {
    let viewport = Size::new(390.0, 844.0);
    let mut cam = CameraController::new(CameraConfig::default());
    cam.set_viewport(viewport);
    cam.set_tree_bounds(Rect::new(0.0, 0.0, 6000.0, 2400.0));
    cam.set_stage(center_on_stage(Point::new(300.0, 400.0), 1.0, viewport));

    let mut now = 0_u64;
    let mut finger = Point::new(200.0, 400.0);
    cam.handle(GestureInput::PanBegin { position: finger }, now);
    for _ in 0..8 {
        now += 16;
        finger.x -= 40.0;
        cam.handle(GestureInput::PanUpdate { position: finger }, now);
        report("drag", &cam, now);
    }
    cam.handle(
        GestureInput::PanEnd {
            velocity: Vec2::new(-2500.0, 0.0),
        },
        now,
    );
    now = settle(&mut cam, now, "coast");
    report("rest", &cam, now);

    // Drag past the left edge, then let go so the camera springs back.
    let mut finger = Point::new(50.0, 400.0);
    let target = center_on_stage(Point::new(100.0, 400.0), 1.0, viewport);
    cam.set_stage(target);
    cam.handle(GestureInput::PanBegin { position: finger }, now);
    for _ in 0..10 {
        now += 16;
        finger.x += 60.0;
        cam.handle(GestureInput::PanUpdate { position: finger }, now);
    }
    report("overscroll", &cam, now);
    cam.handle(
        GestureInput::PanEnd {
            velocity: Vec2::ZERO,
        },
        now,
    );
    now = settle(&mut cam, now, "spring");
    report("settled", &cam, now);
}

/// Tick at 60 Hz until the camera stops moving on its own.
fn settle(cam: &mut CameraController, mut now: u64, phase: &str) -> u64 {
    for _ in 0..600 {
        if !cam.state().is_in_motion() {
            break;
        }
        now += 16;
        cam.tick(now);
        report(phase, cam, now);
    }
    now
}

fn report(phase: &str, cam: &CameraController, now: u64) {
    let s = cam.stage();
    println!(
        "{now:>5} ms  {phase:<10} {:?}  translate ({:>9.2}, {:>8.2})  scale {:.3}",
        cam.state(),
        s.translate.x,
        s.translate.y,
        s.scale
    );
}
