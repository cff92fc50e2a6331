// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_view --heading-base-level=0

//! Arbor View: a touch camera that keeps a tree on screen.
//!
//! - [`Stage`]: uniform pan and zoom, `screen = world * scale + translate`,
//!   with world/screen conversion and the visible world rectangle.
//! - [`clamp_to_bounds`] and [`AllowedRanges`]: how far the camera may pan at a
//!   given scale so the tree never leaves the viewport.
//! - [`AxisRange::rubber_band`]: elastic resistance past a boundary.
//! - [`Momentum`]: frame-rate independent fling decay.
//! - [`PinchAnchor`]: zoom about the two-finger centroid.
//! - [`CameraAnimation`] and [`Easing`]: timed moves for spring-back and navigation.
//! - [`CameraController`]: the [`GestureState`] machine tying the above together.
//!
//! Time is passed in as milliseconds so the controller never reads a clock.
//!
//! ## Example
//!
//! ```
//! use arbor_view::{CameraController, GestureInput, GestureState};
//! use kurbo::{Point, Rect, Size, Vec2};
//!
//! let mut camera = CameraController::default();
//! camera.set_viewport(Size::new(390.0, 844.0));
//! camera.set_tree_bounds(Rect::new(0.0, 0.0, 4000.0, 2400.0));
//!
//! camera.handle(GestureInput::PanBegin { position: Point::new(100.0, 100.0) }, 0);
//! camera.handle(GestureInput::PanUpdate { position: Point::new(60.0, 90.0) }, 16);
//! camera.handle(GestureInput::PanEnd { velocity: Vec2::new(-900.0, 0.0) }, 32);
//! assert_eq!(camera.state(), GestureState::Momentum);
//!
//! let mut now = 32;
//! while camera.state() != GestureState::Idle {
//!     now += 16;
//!     camera.tick(now);
//! }
//! assert!(!camera.is_out_of_bounds());
//! ```

mod animation;
mod bounds;
mod camera;
mod config;
mod gesture;
mod momentum;
mod pinch;
mod stage;

pub use animation::{CameraAnimation, Easing};
pub use bounds::{
    AllowedRanges, AxisRange, Clamped, EXTENT_MARGIN_RATIO, MARGIN_PX, VIEWPORT_MARGIN_RATIO,
    clamp_to_bounds,
};
pub use camera::CameraController;
pub use config::CameraConfig;
pub use gesture::{GestureInput, GestureOutcome, GestureState};
pub use momentum::Momentum;
pub use pinch::PinchAnchor;
pub use stage::{MIN_EXTENT, MIN_SCALE, Stage, center_on_stage, fit_rect_stage, sanitize_size};
