// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger zoom that keeps the pinched content under the fingers.

use kurbo::{Point, Vec2};

use crate::stage::Stage;

/// State captured when a pinch begins.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinchAnchor {
    /// Stage at pinch start.
    pub start: Stage,
    /// Two-finger centroid at pinch start, in screen space.
    pub start_focal: Point,
    /// World point that was under `start_focal`.
    pub anchor_world: Point,
}

impl PinchAnchor {
    /// Capture the anchor for a pinch starting at `focal`.
    pub fn begin(start: Stage, focal: Point) -> Self {
        Self {
            start,
            start_focal: focal,
            anchor_world: start.screen_to_world(focal),
        }
    }

    /// Stage for a cumulative pinch `factor` with the live centroid at `focal`.
    ///
    /// The scale is `start.scale * factor` clamped to `[min_zoom, max_zoom]`.
    /// The anchor world point stays under the initial centroid, and the drift
    /// of the live centroid from the initial one pans on top of that.
    pub fn update(&self, factor: f64, focal: Point, min_zoom: f64, max_zoom: f64) -> Stage {
        let factor = if factor.is_finite() && factor > 0.0 { factor } else { 1.0 };
        let scale = (self.start.safe_scale() * factor).max(min_zoom).min(max_zoom);
        let drift: Vec2 = focal - self.start_focal;
        let translate = self.start_focal.to_vec2() - self.anchor_world.to_vec2() * scale + drift;
        Stage::new(translate, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_stays_under_still_fingers() {
        let start = Stage::new(Vec2::new(-120.0, 35.0), 1.0);
        let focal = Point::new(200.0, 400.0);
        let pinch = PinchAnchor::begin(start, focal);
        for factor in [0.3, 0.75, 1.0, 2.5] {
            let s = pinch.update(factor, focal, 0.05, 3.0);
            let p = s.world_to_screen(pinch.anchor_world);
            assert!((p - focal).hypot() < 1e-9, "factor {factor} moved the anchor to {p:?}");
        }
    }

    #[test]
    fn centroid_drift_pans() {
        let pinch = PinchAnchor::begin(Stage::IDENTITY, Point::new(100.0, 100.0));
        let s = pinch.update(2.0, Point::new(130.0, 90.0), 0.05, 3.0);
        let p = s.world_to_screen(pinch.anchor_world);
        assert!((p - Point::new(130.0, 90.0)).hypot() < 1e-9);
    }

    #[test]
    fn scale_is_clamped() {
        let pinch = PinchAnchor::begin(Stage::IDENTITY, Point::ORIGIN);
        assert_eq!(pinch.update(100.0, Point::ORIGIN, 0.05, 3.0).scale, 3.0);
        assert_eq!(pinch.update(0.0, Point::ORIGIN, 0.05, 3.0).scale, 1.0);
    }
}
