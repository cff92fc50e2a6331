// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timed camera moves.

use kurbo::{Point, Size};

use crate::stage::{Stage, center_on_stage};

/// Easing curve applied to normalized animation time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Fast start, gentle landing.
    #[default]
    EaseOutCubic,
    /// Gentle start and landing.
    EaseInOutCubic,
}

impl Easing {
    /// Map `t` in `[0, 1]` to eased progress in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
                }
            }
        }
    }
}

/// An eased move between two stages.
///
/// Scale is interpolated geometrically and the world point at the viewport
/// center travels in a straight line, so zooming moves feel uniform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraAnimation {
    from: Stage,
    to: Stage,
    viewport: Size,
    start_ms: u64,
    duration_ms: u64,
    easing: Easing,
}

impl CameraAnimation {
    /// Start a move at `start_ms`.
    pub fn new(
        from: Stage,
        to: Stage,
        viewport: Size,
        start_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Self {
        Self {
            from,
            to,
            viewport,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Final stage.
    pub fn target(&self) -> Stage {
        self.to
    }

    /// Whether the animation has reached its end at `now_ms`.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Stage at `now_ms`. Exactly the target once finished.
    pub fn sample(&self, now_ms: u64) -> Stage {
        if self.is_finished(now_ms) {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = elapsed as f64 / self.duration_ms as f64;
        let e = self.easing.apply(t);

        let s0 = self.from.safe_scale();
        let s1 = self.to.safe_scale();
        let scale = (s0.ln() + (s1.ln() - s0.ln()) * e).exp();
        let c0 = self.from.world_center(self.viewport);
        let c1 = self.to.world_center(self.viewport);
        let center = Point::lerp(c0, c1, e);
        center_on_stage(center, scale, self.viewport)
    }
}
