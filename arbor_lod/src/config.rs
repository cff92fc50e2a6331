// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuning for tiers and image buckets.

/// Tier selection tuning. Pixel sizes are device pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LodConfig {
    /// Reference node width in layout units.
    pub base_width: f64,
    /// Multiplicative step scale is snapped to before thresholds are applied.
    pub scale_step: f64,
    /// Full card below this on-screen width becomes a pill.
    pub full_threshold_px: f64,
    /// Pill below this on-screen width becomes a hero chip (if enabled).
    pub aggregate_threshold_px: f64,
    /// Relative dead band around each threshold.
    pub hysteresis: f64,
    /// Enable the hero-chip tier.
    pub aggregate_tier: bool,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            base_width: 160.0,
            scale_step: 1.05,
            full_threshold_px: 96.0,
            aggregate_threshold_px: 36.0,
            hysteresis: 0.15,
            aggregate_tier: false,
        }
    }
}

/// Image resolution bucket tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImageConfig {
    /// Available bucket sizes in pixels, ascending.
    pub buckets: Vec<u32>,
    /// An upgrade needs the requirement to exceed the current bucket by this factor,
    /// and a downgrade needs the smaller bucket to exceed the requirement by it.
    pub headroom: f64,
    /// How long a larger requirement must persist before an upgrade commits.
    pub upgrade_debounce_ms: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            buckets: vec![64, 128, 256, 512],
            headroom: 1.15,
            upgrade_debounce_ms: 150,
        }
    }
}
