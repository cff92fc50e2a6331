// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping the tree on screen: allowed translation ranges, clamping, and rubber banding.

use kurbo::{Rect, Size, Vec2};

use crate::config::sanitize_scale;
use crate::stage::{MIN_EXTENT, Stage, sanitize_size};

/// Screen margin kept around the tree at any zoom, in pixels.
pub const MARGIN_PX: f64 = 48.0;

/// Margin as a fraction of the tree's extent on each axis.
pub const EXTENT_MARGIN_RATIO: f64 = 0.08;

/// Margin as a fraction of half the viewport, in world units.
pub const VIEWPORT_MARGIN_RATIO: f64 = 0.25;

/// Inclusive range of allowed values for one translation component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl AxisRange {
    /// Create a range, reordering the bounds if needed.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Whether `v` lies within the range.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    /// Nearest in-range value.
    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.min).min(self.max)
    }

    /// Signed distance past the nearest bound; zero inside.
    pub fn overshoot(&self, v: f64) -> f64 {
        if v < self.min {
            v - self.min
        } else if v > self.max {
            v - self.max
        } else {
            0.0
        }
    }

    /// Map a free value into the range with elastic resistance outside it.
    ///
    /// Identity inside; outside, `bound + o * tension / (1 + |o| / soft_zone)`
    /// where `o` is the overshoot. The result lies strictly between `v` and the
    /// bound, and never further than `tension * soft_zone` past it.
    pub fn rubber_band(&self, v: f64, tension: f64, soft_zone: f64) -> f64 {
        let o = self.overshoot(v);
        if o == 0.0 {
            return v;
        }
        let soft = soft_zone.max(MIN_EXTENT);
        let bound = if o < 0.0 { self.min } else { self.max };
        bound + o * tension / (1.0 + o.abs() / soft)
    }

    /// Inverse of [`AxisRange::rubber_band`]: the free value that bands to `v`.
    ///
    /// Values at or beyond the asymptote are returned unchanged.
    pub fn unband(&self, v: f64, tension: f64, soft_zone: f64) -> f64 {
        let d = self.overshoot(v);
        if d == 0.0 {
            return v;
        }
        let soft = soft_zone.max(MIN_EXTENT);
        let denom = tension - d.abs() / soft;
        if denom <= f64::EPSILON {
            return v;
        }
        let bound = if d < 0.0 { self.min } else { self.max };
        bound + d / denom
    }
}

/// Allowed translation ranges for one scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AllowedRanges {
    /// Horizontal translation.
    pub x: AxisRange,
    /// Vertical translation.
    pub y: AxisRange,
}

impl AllowedRanges {
    /// Compute the ranges for `scale`.
    ///
    /// Per axis, with `margin = max(0.08 * extent, 48 / scale, 0.25 * half / scale)`:
    /// `min = half - (far + margin) * scale` and `max = half - (near - margin) * scale`.
    pub fn for_scale(scale: f64, viewport: Size, tree_bounds: Rect) -> Self {
        let scale = sanitize_scale(scale);
        let viewport = sanitize_size(viewport);
        let b = tree_bounds.abs();
        let axis = |near: f64, far: f64, half: f64| {
            let extent = (far - near).max(MIN_EXTENT);
            let margin = (EXTENT_MARGIN_RATIO * extent)
                .max(MARGIN_PX / scale)
                .max(VIEWPORT_MARGIN_RATIO * (half / scale));
            AxisRange::new(half - (far + margin) * scale, half - (near - margin) * scale)
        };
        Self {
            x: axis(b.x0, b.x1, viewport.width * 0.5),
            y: axis(b.y0, b.y1, viewport.height * 0.5),
        }
    }

    /// Whether `t` is inside both ranges.
    pub fn contains(&self, t: Vec2) -> bool {
        self.x.contains(t.x) && self.y.contains(t.y)
    }

    /// Nearest in-range translation.
    pub fn clamp(&self, t: Vec2) -> Vec2 {
        Vec2::new(self.x.clamp(t.x), self.y.clamp(t.y))
    }

    /// Rubber band both components.
    pub fn rubber_band(&self, t: Vec2, tension: f64, soft_zone: f64) -> Vec2 {
        Vec2::new(
            self.x.rubber_band(t.x, tension, soft_zone),
            self.y.rubber_band(t.y, tension, soft_zone),
        )
    }

    /// Invert [`AllowedRanges::rubber_band`] on both components.
    pub fn unband(&self, t: Vec2, tension: f64, soft_zone: f64) -> Vec2 {
        Vec2::new(
            self.x.unband(t.x, tension, soft_zone),
            self.y.unband(t.y, tension, soft_zone),
        )
    }
}

/// Result of [`clamp_to_bounds`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Clamped {
    /// The corrected stage.
    pub stage: Stage,
    /// Ranges at the corrected scale, for freezing during a gesture.
    pub allowed: AllowedRanges,
}

/// Clamp scale into `[min_zoom, max_zoom]` and translation into the allowed ranges.
///
/// Idempotent: clamping a clamped stage returns it unchanged.
pub fn clamp_to_bounds(
    stage: Stage,
    viewport: Size,
    tree_bounds: Rect,
    min_zoom: f64,
    max_zoom: f64,
) -> Clamped {
    let lo = sanitize_scale(min_zoom.min(max_zoom));
    let hi = sanitize_scale(min_zoom.max(max_zoom));
    let scale = stage.safe_scale().clamp(lo, hi);
    let allowed = AllowedRanges::for_scale(scale, viewport, tree_bounds);
    let translate = if stage.translate.is_finite() {
        allowed.clamp(stage.translate)
    } else {
        Vec2::new(
            (allowed.x.min + allowed.x.max) * 0.5,
            (allowed.y.min + allowed.y.max) * 0.5,
        )
    };
    Clamped {
        stage: Stage::new(translate, scale),
        allowed,
    }
}
