// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use arbor_lod::{ImageConfig, LodConfig};
use arbor_render::{HighlightConfig, RenderConfig};
use arbor_view::CameraConfig;

/// Spatial index and visible-set query tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Grid cell edge in layout units.
    pub cell_size: f64,
    /// Nodes returned per visible-set query at most.
    pub max_visible: usize,
    /// Screen pixels added around the viewport before querying.
    pub margin_px: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 512.0,
            max_visible: 400,
            margin_px: 64.0,
        }
    }
}

/// When derived render state is recomputed.
///
/// Any one condition passing commits a frame. The camera transform itself is
/// published every tick regardless.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThrottleConfig {
    /// Movement of the world point at the viewport center, in layout units.
    pub min_center_delta: f64,
    /// Relative scale change.
    pub min_scale_ratio: f64,
    /// Longest a changed transform may wait for a commit.
    pub max_interval_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_center_delta: 32.0,
            min_scale_ratio: 0.05,
            max_interval_ms: 200,
        }
    }
}

/// Every tunable of the engine, grouped by component.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Spatial index.
    pub grid: GridConfig,
    /// Camera physics and limits.
    pub camera: CameraConfig,
    /// Detail tiers.
    pub lod: LodConfig,
    /// Photo resolution buckets.
    pub image: ImageConfig,
    /// Drawing.
    pub render: RenderConfig,
    /// Ancestry glow.
    pub highlight: HighlightConfig,
    /// Frame commit throttle.
    pub throttle: ThrottleConfig,
    /// Draw the debug overlay into each frame.
    pub debug_overlay: bool,
}
