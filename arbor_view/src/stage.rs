// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera state and the coordinate conversions derived from it.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::config::sanitize_scale;

/// Smallest scale ever divided by.
pub const MIN_SCALE: f64 = 1e-4;

/// Smallest extent (viewport side or tree bounds side) ever divided by.
pub const MIN_EXTENT: f64 = 1.0;

/// Uniform pan and zoom: `screen = world * scale + translate`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage {
    /// Screen position of the world origin.
    pub translate: Vec2,
    /// Screen pixels per world unit.
    pub scale: f64,
}

impl Default for Stage {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Stage {
    /// World origin at the screen origin, one pixel per unit.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Create a stage.
    pub const fn new(translate: Vec2, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// The scale with degenerate values replaced by [`MIN_SCALE`].
    pub fn safe_scale(&self) -> f64 {
        sanitize_scale(self.scale)
    }

    /// World-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }

    /// Convert a world point to screen space.
    pub fn world_to_screen(&self, p: Point) -> Point {
        (p.to_vec2() * self.scale + self.translate).to_point()
    }

    /// Convert a screen point to world space.
    pub fn screen_to_world(&self, p: Point) -> Point {
        ((p.to_vec2() - self.translate) / self.safe_scale()).to_point()
    }

    /// The world rectangle covered by a viewport of `size` at the screen origin.
    pub fn visible_world_rect(&self, size: Size) -> Rect {
        let size = sanitize_size(size);
        Rect::from_points(
            self.screen_to_world(Point::ORIGIN),
            self.screen_to_world(Point::new(size.width, size.height)),
        )
    }

    /// The world point under the viewport center.
    pub fn world_center(&self, size: Size) -> Point {
        let size = sanitize_size(size);
        self.screen_to_world(Point::new(size.width * 0.5, size.height * 0.5))
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.translate.is_finite() && self.scale.is_finite()
    }
}

/// A viewport size with each side kept at or above [`MIN_EXTENT`].
pub fn sanitize_size(size: Size) -> Size {
    let side = |v: f64| if v.is_finite() { v.max(MIN_EXTENT) } else { MIN_EXTENT };
    Size::new(side(size.width), side(size.height))
}

/// Stage that centers `point` in the viewport at `scale`.
pub fn center_on_stage(point: Point, scale: f64, viewport: Size) -> Stage {
    let scale = sanitize_scale(scale);
    let half = sanitize_size(viewport).to_vec2() * 0.5;
    Stage::new(half - point.to_vec2() * scale, scale)
}

/// Stage that shows all of `rect` with `padding` screen pixels to spare, centered.
///
/// The scale is clamped into `[min_zoom, max_zoom]`, so very large rectangles
/// may still overflow the viewport.
pub fn fit_rect_stage(rect: Rect, viewport: Size, padding: f64, min_zoom: f64, max_zoom: f64) -> Stage {
    let viewport = sanitize_size(viewport);
    let rect = rect.abs();
    let pad = padding.max(0.0);
    let avail_w = (viewport.width - 2.0 * pad).max(MIN_EXTENT);
    let avail_h = (viewport.height - 2.0 * pad).max(MIN_EXTENT);
    let sx = avail_w / rect.width().max(MIN_EXTENT);
    let sy = avail_h / rect.height().max(MIN_EXTENT);
    let (lo, hi) = (sanitize_scale(min_zoom.min(max_zoom)), sanitize_scale(min_zoom.max(max_zoom)));
    let scale = sx.min(sy).clamp(lo, hi);
    center_on_stage(rect.center(), scale, viewport)
}
