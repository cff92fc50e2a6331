// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera tuning.

/// Tuning for zoom limits, bounds margins, rubber banding, momentum, and spring-back.
///
/// Distances suffixed `_px` are screen pixels; all durations are milliseconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraConfig {
    /// Smallest scale a gesture or animation may reach.
    pub min_zoom: f64,
    /// Largest scale a gesture or animation may reach.
    pub max_zoom: f64,
    /// Resistance applied past a boundary, in `(0, 1)`.
    pub rubber_tension: f64,
    /// Overshoot distance over which resistance doubles.
    pub rubber_soft_zone_px: f64,
    /// Velocity multiplier applied per elapsed millisecond of momentum.
    pub momentum_decay_per_ms: f64,
    /// Momentum stops once speed falls below this, in pixels per second.
    pub momentum_stop_speed: f64,
    /// Duration of the spring back into bounds.
    pub spring_back_ms: u64,
    /// Duration of programmatic moves (navigation, recentering, fits).
    pub navigate_ms: u64,
    /// Screen padding kept around a rectangle when fitting it.
    pub fit_padding_px: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.05,
            max_zoom: 3.0,
            rubber_tension: 0.55,
            rubber_soft_zone_px: 200.0,
            momentum_decay_per_ms: 0.998,
            momentum_stop_speed: 8.0,
            spring_back_ms: 280,
            navigate_ms: 450,
            fit_padding_px: 32.0,
        }
    }
}

impl CameraConfig {
    /// The zoom limits, ordered and kept above [`MIN_SCALE`](crate::MIN_SCALE).
    pub fn zoom_range(&self) -> (f64, f64) {
        let lo = sanitize_scale(self.min_zoom.min(self.max_zoom));
        let hi = sanitize_scale(self.min_zoom.max(self.max_zoom));
        (lo, hi)
    }
}

pub(crate) fn sanitize_scale(s: f64) -> f64 {
    if s.is_finite() {
        s.max(crate::MIN_SCALE)
    } else {
        crate::MIN_SCALE
    }
}
