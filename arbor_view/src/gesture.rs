// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture samples fed to the camera, and the states the camera moves through.

use kurbo::{Point, Vec2};

/// One sample from the host's gesture recognizer. Positions are screen pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureInput {
    /// A single finger started dragging at `position`.
    PanBegin {
        /// Finger position.
        position: Point,
    },
    /// The dragging finger moved to `position`.
    PanUpdate {
        /// Finger position.
        position: Point,
    },
    /// The finger lifted while moving at `velocity` pixels per second.
    PanEnd {
        /// Release velocity in pixels per second.
        velocity: Vec2,
    },
    /// Two fingers touched down with their centroid at `focal`.
    PinchBegin {
        /// Two-finger centroid.
        focal: Point,
    },
    /// Two fingers moved. `scale` is cumulative since the pinch began.
    PinchUpdate {
        /// Two-finger centroid.
        focal: Point,
        /// Finger distance relative to the distance at pinch start.
        scale: f64,
    },
    /// The pinch ended.
    PinchEnd,
    /// A short touch without movement.
    Tap {
        /// Touch position.
        position: Point,
    },
    /// A held touch without movement.
    LongPress {
        /// Touch position.
        position: Point,
    },
}

impl GestureInput {
    /// Whether every number in the sample is finite (and the pinch scale positive).
    pub fn is_valid(&self) -> bool {
        match *self {
            Self::PanBegin { position }
            | Self::PanUpdate { position }
            | Self::Tap { position }
            | Self::LongPress { position } => position.is_finite(),
            Self::PanEnd { velocity } => velocity.is_finite(),
            Self::PinchBegin { focal } => focal.is_finite(),
            Self::PinchUpdate { focal, scale } => {
                focal.is_finite() && scale.is_finite() && scale > 0.0
            }
            Self::PinchEnd => true,
        }
    }
}

/// What the camera is doing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GestureState {
    /// At rest.
    Idle,
    /// Following one finger.
    Panning,
    /// Following two fingers.
    Pinching,
    /// Coasting after a fling.
    Momentum,
    /// Running a timed move (spring-back or navigation).
    Animating,
}

impl GestureState {
    /// Whether a finger currently owns the camera.
    pub fn is_touching(self) -> bool {
        matches!(self, Self::Panning | Self::Pinching)
    }

    /// Whether the camera is moving on its own.
    pub fn is_in_motion(self) -> bool {
        matches!(self, Self::Momentum | Self::Animating)
    }
}

/// Result of feeding a sample to the camera.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// The sample did not apply in the current state, or was malformed.
    Ignored,
    /// The stage may have changed.
    Moved,
    /// A gesture ended; the camera may now be coasting or springing back.
    Released,
    /// A tap was accepted.
    Tap {
        /// Screen position.
        screen: Point,
        /// World position under the tap.
        world: Point,
    },
    /// A long press was accepted.
    LongPress {
        /// Screen position.
        screen: Point,
        /// World position under the press.
        world: Point,
    },
}
