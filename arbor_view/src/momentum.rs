// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exponentially decaying fling after a pan is released.

use kurbo::Vec2;

/// Fling state: a free (unbanded) translation and a velocity in pixels per second.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Momentum {
    /// Current free translation. Display it through the frozen ranges' rubber band.
    pub free: Vec2,
    /// Current velocity in pixels per second.
    pub velocity: Vec2,
    /// Velocity multiplier per elapsed millisecond.
    pub decay_per_ms: f64,
    /// Speed below which the fling stops, in pixels per second.
    pub stop_speed: f64,
}

impl Momentum {
    /// Start a fling.
    pub fn new(free: Vec2, velocity: Vec2, decay_per_ms: f64, stop_speed: f64) -> Self {
        Self {
            free,
            velocity,
            decay_per_ms: decay_per_ms.clamp(f64::EPSILON, 1.0 - f64::EPSILON),
            stop_speed: stop_speed.max(0.0),
        }
    }

    /// Whether the fling has already come to rest.
    pub fn is_stopped(&self) -> bool {
        !self.velocity.is_finite() || self.velocity.hypot() < self.stop_speed
    }

    /// Advance by `dt_ms`. Returns `true` once the fling has stopped.
    ///
    /// Displacement integrates the decaying velocity exactly, so the path is
    /// the same whatever the frame rate.
    pub fn step(&mut self, dt_ms: f64) -> bool {
        if self.is_stopped() {
            self.velocity = Vec2::ZERO;
            return true;
        }
        let dt = dt_ms.max(0.0);
        if dt == 0.0 {
            return false;
        }
        let k = self.decay_per_ms;
        let factor = k.powf(dt);
        // Integral of v * k^t over [0, dt] ms, with v converted to pixels per ms.
        let travel_ms = (factor - 1.0) / k.ln();
        self.free += self.velocity * (travel_ms / 1000.0);
        self.velocity *= factor;
        if self.is_stopped() {
            self.velocity = Vec2::ZERO;
            return true;
        }
        false
    }
}
