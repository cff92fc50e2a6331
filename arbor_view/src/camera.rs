// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The camera controller: a gesture state machine over a [`Stage`].

use kurbo::{Point, Rect, Size, Vec2};
use log::{debug, trace};

use crate::animation::{CameraAnimation, Easing};
use crate::bounds::{AllowedRanges, Clamped, clamp_to_bounds};
use crate::config::CameraConfig;
use crate::gesture::{GestureInput, GestureOutcome, GestureState};
use crate::momentum::Momentum;
use crate::pinch::PinchAnchor;
use crate::stage::{Stage, center_on_stage, fit_rect_stage, sanitize_size};

const TARGET: &str = "arbor::view";

#[derive(Copy, Clone, Debug)]
enum Mode {
    Idle,
    Panning {
        ranges: AllowedRanges,
        start_free: Vec2,
        start_position: Point,
        free: Vec2,
    },
    Pinching {
        anchor: PinchAnchor,
    },
    Momentum {
        momentum: Momentum,
        ranges: AllowedRanges,
        last_ms: u64,
    },
    Animating(CameraAnimation),
}

/// Owns the camera stage and turns gesture samples and clock ticks into stage changes.
///
/// The controller never lets the view escape the tree bounds for long: while a
/// finger drags past the allowed range the stage is rubber banded, and on
/// release it springs back. Every sample is O(1).
///
/// Allowed ranges are frozen when a pan begins. Call [`CameraController::tick`]
/// every frame to advance momentum and animations.
#[derive(Clone, Debug)]
pub struct CameraController {
    config: CameraConfig,
    stage: Stage,
    viewport: Size,
    tree_bounds: Rect,
    mode: Mode,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraController {
    /// Create a controller at the identity stage with a unit viewport.
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            stage: Stage::IDENTITY,
            viewport: sanitize_size(Size::ZERO),
            tree_bounds: Rect::ZERO,
            mode: Mode::Idle,
        }
    }

    /// Tuning in effect.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Current viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Bounds the camera is kept around.
    pub fn tree_bounds(&self) -> Rect {
        self.tree_bounds
    }

    /// What the camera is doing.
    pub fn state(&self) -> GestureState {
        match self.mode {
            Mode::Idle => GestureState::Idle,
            Mode::Panning { .. } => GestureState::Panning,
            Mode::Pinching { .. } => GestureState::Pinching,
            Mode::Momentum { .. } => GestureState::Momentum,
            Mode::Animating(_) => GestureState::Animating,
        }
    }

    /// Allowed translation ranges at the current scale.
    pub fn allowed_ranges(&self) -> AllowedRanges {
        AllowedRanges::for_scale(self.stage.scale, self.viewport, self.tree_bounds)
    }

    /// The current stage clamped into bounds.
    pub fn clamped(&self) -> Clamped {
        let (lo, hi) = self.config.zoom_range();
        clamp_to_bounds(self.stage, self.viewport, self.tree_bounds, lo, hi)
    }

    /// Whether the stage is currently outside the allowed ranges or zoom limits.
    pub fn is_out_of_bounds(&self) -> bool {
        self.clamped().stage != self.stage
    }

    /// Set the viewport size. Snaps into bounds unless a gesture or move is in progress.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = sanitize_size(size);
        self.settle_if_idle();
    }

    /// Set the bounds to keep on screen. Snaps into bounds unless a gesture or move is in progress.
    pub fn set_tree_bounds(&mut self, bounds: Rect) {
        self.tree_bounds = bounds.abs();
        self.settle_if_idle();
    }

    /// Jump to `stage` (clamped), cancelling any motion.
    pub fn set_stage(&mut self, stage: Stage) {
        self.cancel_motion();
        if self.state().is_touching() {
            self.mode = Mode::Idle;
        }
        self.stage = stage;
        self.stage = self.clamped().stage;
    }

    fn settle_if_idle(&mut self) {
        if matches!(self.mode, Mode::Idle) {
            self.stage = self.clamped().stage;
        }
    }

    /// Stop momentum or a running animation where it is. Returns whether anything stopped.
    pub fn cancel_motion(&mut self) -> bool {
        if self.state().is_in_motion() {
            trace!(target: TARGET, "cancelling {:?}", self.state());
            self.mode = Mode::Idle;
            true
        } else {
            false
        }
    }

    fn spring_back(&mut self, now_ms: u64) {
        let target = self.clamped().stage;
        if target == self.stage {
            self.mode = Mode::Idle;
            return;
        }
        debug!(target: TARGET, "springing back from {:?} to {:?}", self.stage, target);
        self.mode = Mode::Animating(CameraAnimation::new(
            self.stage,
            target,
            self.viewport,
            now_ms,
            self.config.spring_back_ms,
            Easing::EaseOutCubic,
        ));
    }

    /// Feed one gesture sample.
    pub fn handle(&mut self, input: GestureInput, now_ms: u64) -> GestureOutcome {
        if !input.is_valid() {
            debug!(target: TARGET, "dropping malformed gesture sample {input:?}");
            return GestureOutcome::Ignored;
        }
        let (tension, soft) = (self.config.rubber_tension, self.config.rubber_soft_zone_px);
        match input {
            GestureInput::PanBegin { position } => {
                if matches!(self.mode, Mode::Pinching { .. }) {
                    return GestureOutcome::Ignored;
                }
                self.cancel_motion();
                let ranges = self.allowed_ranges();
                let free = ranges.unband(self.stage.translate, tension, soft);
                self.mode = Mode::Panning {
                    ranges,
                    start_free: free,
                    start_position: position,
                    free,
                };
                GestureOutcome::Moved
            }
            GestureInput::PanUpdate { position } => {
                let Mode::Panning {
                    ranges,
                    start_free,
                    start_position,
                    ref mut free,
                } = self.mode
                else {
                    return GestureOutcome::Ignored;
                };
                *free = start_free + (position - start_position);
                self.stage.translate = ranges.rubber_band(*free, tension, soft);
                GestureOutcome::Moved
            }
            GestureInput::PanEnd { velocity } => {
                let Mode::Panning { ranges, free, .. } = self.mode else {
                    return GestureOutcome::Ignored;
                };
                if !ranges.contains(self.stage.translate) {
                    self.spring_back(now_ms);
                } else {
                    let momentum = Momentum::new(
                        free,
                        velocity,
                        self.config.momentum_decay_per_ms,
                        self.config.momentum_stop_speed,
                    );
                    self.mode = if momentum.is_stopped() {
                        Mode::Idle
                    } else {
                        Mode::Momentum {
                            momentum,
                            ranges,
                            last_ms: now_ms,
                        }
                    };
                }
                GestureOutcome::Released
            }
            GestureInput::PinchBegin { focal } => {
                // A pan in progress ends here without momentum.
                self.cancel_motion();
                self.mode = Mode::Pinching {
                    anchor: PinchAnchor::begin(self.stage, focal),
                };
                GestureOutcome::Moved
            }
            GestureInput::PinchUpdate { focal, scale } => {
                let Mode::Pinching { anchor } = self.mode else {
                    return GestureOutcome::Ignored;
                };
                let (lo, hi) = self.config.zoom_range();
                let s = anchor.update(scale, focal, lo, hi);
                let ranges = AllowedRanges::for_scale(s.scale, self.viewport, self.tree_bounds);
                self.stage = Stage::new(ranges.rubber_band(s.translate, tension, soft), s.scale);
                GestureOutcome::Moved
            }
            GestureInput::PinchEnd => {
                if !matches!(self.mode, Mode::Pinching { .. }) {
                    return GestureOutcome::Ignored;
                }
                self.spring_back(now_ms);
                GestureOutcome::Released
            }
            GestureInput::Tap { position } | GestureInput::LongPress { position } => {
                if self.state().is_touching() {
                    return GestureOutcome::Ignored;
                }
                if self.cancel_motion() {
                    self.stage = self.clamped().stage;
                }
                let world = self.stage.screen_to_world(position);
                if matches!(input, GestureInput::Tap { .. }) {
                    GestureOutcome::Tap {
                        screen: position,
                        world,
                    }
                } else {
                    GestureOutcome::LongPress {
                        screen: position,
                        world,
                    }
                }
            }
        }
    }

    /// Advance momentum or animation to `now_ms`. Returns whether the stage changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let (tension, soft) = (self.config.rubber_tension, self.config.rubber_soft_zone_px);
        match self.mode {
            Mode::Momentum {
                ref mut momentum,
                ranges,
                ref mut last_ms,
            } => {
                let dt = now_ms.saturating_sub(*last_ms);
                *last_ms = now_ms;
                let stopped = momentum.step(dt as f64);
                let before = self.stage;
                self.stage.translate = ranges.rubber_band(momentum.free, tension, soft);
                if stopped {
                    if ranges.contains(self.stage.translate) {
                        self.mode = Mode::Idle;
                    } else {
                        self.spring_back(now_ms);
                    }
                }
                before != self.stage
            }
            Mode::Animating(anim) => {
                let before = self.stage;
                self.stage = anim.sample(now_ms);
                if anim.is_finished(now_ms) {
                    self.mode = Mode::Idle;
                }
                before != self.stage
            }
            Mode::Idle | Mode::Panning { .. } | Mode::Pinching { .. } => false,
        }
    }

    /// Start an eased move to `target` (clamped into bounds). Returns the clamped target.
    pub fn animate_to(&mut self, target: Stage, now_ms: u64) -> Stage {
        self.cancel_motion();
        self.mode = Mode::Idle;
        let (lo, hi) = self.config.zoom_range();
        let target = clamp_to_bounds(target, self.viewport, self.tree_bounds, lo, hi).stage;
        if target != self.stage {
            self.mode = Mode::Animating(CameraAnimation::new(
                self.stage,
                target,
                self.viewport,
                now_ms,
                self.config.navigate_ms,
                Easing::EaseInOutCubic,
            ));
        }
        target
    }

    /// Animate so that `point` ends up centered at `scale`.
    pub fn center_on(&mut self, point: Point, scale: f64, now_ms: u64) -> Stage {
        self.animate_to(center_on_stage(point, scale, self.viewport), now_ms)
    }

    /// Animate so that `rect` fits the viewport with the configured padding.
    pub fn fit_rect(&mut self, rect: Rect, now_ms: u64) -> Stage {
        let (lo, hi) = self.config.zoom_range();
        let target = fit_rect_stage(rect, self.viewport, self.config.fit_padding_px, lo, hi);
        self.animate_to(target, now_ms)
    }
}
