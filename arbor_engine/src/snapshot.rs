// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handoff between the transform path and the render-state path.
//!
//! The camera publishes a [`TransformSnapshot`] into a [`SnapshotSlot`] on
//! every change. The render side copies the latest snapshot out and asks the
//! [`RenderThrottle`] whether it is worth recomputing derived state for.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use arbor_view::Stage;
use kurbo::Size;
use log::debug;

use crate::TARGET;
use crate::config::ThrottleConfig;

/// Camera and environment at one instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformSnapshot {
    /// Publish counter, strictly increasing per slot.
    pub version: u64,
    /// Camera.
    pub stage: Stage,
    /// Viewport in screen pixels.
    pub viewport: Size,
    /// Device pixels per screen pixel.
    pub pixel_density: f64,
    /// Node list reload counter.
    pub data_generation: u64,
    /// When the snapshot was taken.
    pub taken_at_ms: u64,
}

impl TransformSnapshot {
    /// Whether `other` describes the same view, ignoring version and time.
    pub fn same_view(&self, other: &Self) -> bool {
        self.stage == other.stage
            && self.viewport == other.viewport
            && self.pixel_density == other.pixel_density
            && self.data_generation == other.data_generation
    }
}

/// Latest published snapshot behind a lock, plus a lock-free version counter.
#[derive(Debug, Default)]
pub struct SnapshotSlot {
    latest: Mutex<Option<TransformSnapshot>>,
    version: AtomicU64,
}

impl SnapshotSlot {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of the view, stamping it with the next version.
    ///
    /// Publishing a view equal to the latest one is a no-op that returns the
    /// current version.
    pub fn publish(
        &self,
        stage: Stage,
        viewport: Size,
        pixel_density: f64,
        data_generation: u64,
        now_ms: u64,
    ) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let mut snap = TransformSnapshot {
            version: 0,
            stage,
            viewport,
            pixel_density,
            data_generation,
            taken_at_ms: now_ms,
        };
        if let Some(prev) = latest.as_ref()
            && prev.same_view(&snap)
        {
            return prev.version;
        }
        snap.version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
        *latest = Some(snap);
        snap.version
    }

    /// Copy of the latest snapshot.
    pub fn latest(&self) -> Option<TransformSnapshot> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Version of the latest snapshot, 0 before the first publish.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}

/// Why a frame was committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommitReason {
    /// Nothing was committed before.
    First,
    /// The node list was reloaded.
    Data,
    /// The viewport size or pixel density changed.
    Viewport,
    /// The viewport center moved far enough.
    Pan,
    /// The scale changed by enough.
    Zoom,
    /// A smaller change waited long enough.
    Interval,
    /// Something other than the camera needs a redraw.
    Forced,
}

/// Decides when a snapshot is different enough to recompute derived state for.
#[derive(Clone, Debug)]
pub struct RenderThrottle {
    config: ThrottleConfig,
    last: Option<TransformSnapshot>,
    committed_at_ms: u64,
}

impl RenderThrottle {
    /// A throttle that will pass the first snapshot it sees.
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            config,
            last: None,
            committed_at_ms: 0,
        }
    }

    /// The last committed snapshot.
    pub fn last(&self) -> Option<&TransformSnapshot> {
        self.last.as_ref()
    }

    /// Why `snap` should be committed at `now_ms`, or `None` to skip it.
    ///
    /// A view that differs from the last commit by less than the pan and zoom
    /// thresholds is still committed once `max_interval_ms` has passed since
    /// that commit, even if the camera has since come to rest.
    pub fn check(&self, snap: &TransformSnapshot, now_ms: u64) -> Option<CommitReason> {
        let Some(last) = self.last.as_ref() else {
            return Some(CommitReason::First);
        };
        if snap.data_generation != last.data_generation {
            return Some(CommitReason::Data);
        }
        if snap.viewport != last.viewport || snap.pixel_density != last.pixel_density {
            return Some(CommitReason::Viewport);
        }
        let c0 = last.stage.world_center(last.viewport);
        let c1 = snap.stage.world_center(snap.viewport);
        if (c1 - c0).hypot() > self.config.min_center_delta {
            return Some(CommitReason::Pan);
        }
        let s0 = last.stage.safe_scale();
        let s1 = snap.stage.safe_scale();
        if s0.max(s1) / s0.min(s1) - 1.0 > self.config.min_scale_ratio {
            return Some(CommitReason::Zoom);
        }
        if snap.stage != last.stage
            && now_ms.saturating_sub(self.committed_at_ms) >= self.config.max_interval_ms
        {
            return Some(CommitReason::Interval);
        }
        None
    }

    /// Record `snap` as committed at `now_ms`.
    pub fn commit(&mut self, snap: TransformSnapshot, reason: CommitReason, now_ms: u64) {
        debug!(target: TARGET, "commit v{} ({reason:?}) at {now_ms} ms", snap.version);
        self.last = Some(snap);
        self.committed_at_ms = now_ms;
    }

    /// Forget the last commit so the next check passes.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    const VP: Size = Size::new(400.0, 300.0);

    fn snap(tx: f64, scale: f64, at: u64) -> TransformSnapshot {
        TransformSnapshot {
            version: 1,
            stage: Stage::new(Vec2::new(tx, 0.0), scale),
            viewport: VP,
            pixel_density: 2.0,
            data_generation: 1,
            taken_at_ms: at,
        }
    }

    fn committed(s: TransformSnapshot) -> RenderThrottle {
        let mut t = RenderThrottle::new(ThrottleConfig::default());
        t.commit(s, CommitReason::First, s.taken_at_ms);
        t
    }

    #[test]
    fn slot_versions_only_on_change() {
        let slot = SnapshotSlot::new();
        assert_eq!(slot.version(), 0);
        assert_eq!(slot.latest(), None);
        let v1 = slot.publish(Stage::IDENTITY, VP, 1.0, 1, 0);
        assert_eq!(slot.publish(Stage::IDENTITY, VP, 1.0, 1, 16), v1);
        let v2 = slot.publish(Stage::new(Vec2::new(1.0, 0.0), 1.0), VP, 1.0, 1, 32);
        assert_eq!(v2, v1 + 1);
        let latest = slot.latest().unwrap();
        assert_eq!(latest.version, v2);
        assert_eq!(latest.taken_at_ms, 32);
    }

    #[test]
    fn first_snapshot_always_passes() {
        let t = RenderThrottle::new(ThrottleConfig::default());
        assert_eq!(t.check(&snap(0.0, 1.0, 0), 0), Some(CommitReason::First));
    }

    #[test]
    fn small_pan_waits_for_interval() {
        let t = committed(snap(0.0, 1.0, 0));
        // 20 px at scale 1 is 20 world units.
        assert_eq!(t.check(&snap(-20.0, 1.0, 50), 50), None);
        assert_eq!(t.check(&snap(-20.0, 1.0, 200), 200), Some(CommitReason::Interval));
        assert_eq!(t.check(&snap(-40.0, 1.0, 60), 60), Some(CommitReason::Pan));
        // An unchanged view never commits on time alone.
        assert_eq!(t.check(&snap(0.0, 1.0, 10_000), 10_000), None);
    }

    #[test]
    fn resting_view_commits_on_the_clock() {
        let t = committed(snap(0.0, 1.0, 0));
        // The camera stopped at 40 ms and the slot kept that stamp.
        let rest = snap(-20.0, 1.0, 40);
        assert_eq!(t.check(&rest, 100), None);
        assert_eq!(t.check(&rest, 200), Some(CommitReason::Interval));
        assert_eq!(t.check(&rest, 5_000), Some(CommitReason::Interval));
    }

    #[test]
    fn pan_threshold_is_in_world_units() {
        // At scale 0.5, 20 px is 40 world units.
        let t = committed(snap(0.0, 0.5, 0));
        assert_eq!(t.check(&snap(-20.0, 0.5, 10), 10), Some(CommitReason::Pan));
    }

    #[test]
    fn zoom_threshold_is_relative() {
        let base = TransformSnapshot {
            stage: arbor_view::center_on_stage(kurbo::Point::ORIGIN, 1.0, VP),
            ..snap(0.0, 1.0, 0)
        };
        let t = committed(base);
        let zoomed = |s: f64| TransformSnapshot {
            stage: arbor_view::center_on_stage(kurbo::Point::ORIGIN, s, VP),
            ..base
        };
        assert_eq!(t.check(&zoomed(1.04), 10), None);
        assert_eq!(t.check(&zoomed(1.06), 10), Some(CommitReason::Zoom));
        assert_eq!(t.check(&zoomed(0.94), 10), Some(CommitReason::Zoom));
    }

    #[test]
    fn viewport_and_data_changes_commit() {
        let t = committed(snap(0.0, 1.0, 0));
        let mut s = snap(0.0, 1.0, 1);
        s.pixel_density = 3.0;
        assert_eq!(t.check(&s, 1), Some(CommitReason::Viewport));
        let mut s = snap(0.0, 1.0, 1);
        s.data_generation = 2;
        assert_eq!(t.check(&s, 1), Some(CommitReason::Data));
    }
}
