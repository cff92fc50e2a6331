// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detail tier selection with a dead band around each threshold.

use log::debug;

use crate::config::LodConfig;

const TARGET: &str = "arbor::lod";

/// How much of each node is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    /// Full card: photo, badge, full name, decorations.
    Full = 1,
    /// Compact pill with the first name only.
    Compact = 2,
    /// Hero chips only.
    Aggregate = 3,
}

impl Tier {
    /// Tier number, 1 to 3.
    pub fn number(self) -> u8 {
        self as u8
    }
}

/// Snap `scale` to the nearest power of `step`.
///
/// Sub-step jitter from a finger resting on the glass maps to the same value,
/// so downstream thresholds never see it.
pub fn quantize_scale(scale: f64, step: f64) -> f64 {
    if !(scale.is_finite() && scale > 0.0) {
        return f64::MIN_POSITIVE;
    }
    if !(step.is_finite() && step > 1.0) {
        return scale;
    }
    let n = (scale.ln() / step.ln()).round();
    step.powf(n)
}

/// Picks the tier for a zoom level, remembering the last committed tier.
///
/// A tier is left only once the on-screen width crosses its threshold by the
/// hysteresis fraction, so small zoom changes near a threshold do not flicker.
#[derive(Clone, Debug)]
pub struct TierSelector {
    config: LodConfig,
    current: Tier,
    last_quantized_scale: Option<f64>,
    last_density: f64,
}

impl Default for TierSelector {
    fn default() -> Self {
        Self::new(LodConfig::default())
    }
}

impl TierSelector {
    /// Create a selector. The first [`TierSelector::update`] picks a tier without hysteresis.
    pub fn new(config: LodConfig) -> Self {
        Self {
            config,
            current: Tier::Full,
            last_quantized_scale: None,
            last_density: 1.0,
        }
    }

    /// Tuning in effect.
    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    /// Last committed tier.
    pub fn current(&self) -> Tier {
        self.current
    }

    /// Quantized scale seen by the last update, if any.
    pub fn last_quantized_scale(&self) -> Option<f64> {
        self.last_quantized_scale
    }

    /// On-screen width of a reference node: `base_width * density * quantized_scale`.
    pub fn pixel_size(&self, scale: f64, pixel_density: f64) -> f64 {
        let density = if pixel_density.is_finite() && pixel_density > 0.0 {
            pixel_density
        } else {
            1.0
        };
        self.config.base_width * density * quantize_scale(scale, self.config.scale_step)
    }

    fn initial_tier(&self, px: f64) -> Tier {
        if px >= self.config.full_threshold_px {
            Tier::Full
        } else if !self.config.aggregate_tier || px >= self.config.aggregate_threshold_px {
            Tier::Compact
        } else {
            Tier::Aggregate
        }
    }

    fn next_tier(&self, px: f64) -> Tier {
        let h = self.config.hysteresis.clamp(0.0, 0.99);
        let t1 = self.config.full_threshold_px;
        let t2 = self.config.aggregate_threshold_px;
        let agg = self.config.aggregate_tier;
        let below_t2 = agg && px < t2 * (1.0 - h);
        match self.current {
            Tier::Full if px < t1 * (1.0 - h) => {
                if below_t2 {
                    Tier::Aggregate
                } else {
                    Tier::Compact
                }
            }
            Tier::Full => Tier::Full,
            Tier::Compact if px > t1 * (1.0 + h) => Tier::Full,
            Tier::Compact if below_t2 => Tier::Aggregate,
            Tier::Compact => Tier::Compact,
            Tier::Aggregate if px > t1 * (1.0 + h) => Tier::Full,
            Tier::Aggregate if !agg || px > t2 * (1.0 + h) => Tier::Compact,
            Tier::Aggregate => Tier::Aggregate,
        }
    }

    /// Commit the tier for `scale` at `pixel_density` and return it.
    pub fn update(&mut self, scale: f64, pixel_density: f64) -> Tier {
        let q = quantize_scale(scale, self.config.scale_step);
        if self.last_quantized_scale == Some(q) && self.last_density == pixel_density {
            return self.current;
        }
        let px = self.pixel_size(scale, pixel_density);
        let next = if self.last_quantized_scale.is_none() {
            self.initial_tier(px)
        } else {
            self.next_tier(px)
        };
        if next != self.current {
            debug!(target: TARGET, "tier {:?} -> {:?} at {px:.1} px (scale {q:.4})", self.current, next);
        }
        self.current = next;
        self.last_quantized_scale = Some(q);
        self.last_density = pixel_density;
        next
    }

    /// Forget history so the next update picks a tier from scratch.
    pub fn reset(&mut self) {
        self.current = Tier::Full;
        self.last_quantized_scale = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_aggregate() -> TierSelector {
        TierSelector::new(LodConfig {
            aggregate_tier: true,
            ..LodConfig::default()
        })
    }

    /// Scale at which a reference node is `px` wide at density 1.
    fn scale_for(px: f64) -> f64 {
        px / 160.0
    }

    #[test]
    fn quantization_snaps_to_powers_of_step() {
        assert_eq!(quantize_scale(1.0, 1.05), 1.0);
        let q = quantize_scale(1.02, 1.05);
        assert_eq!(q, 1.0);
        let q = quantize_scale(1.04, 1.05);
        assert!((q - 1.05).abs() < 1e-12);
        assert_eq!(quantize_scale(0.0, 1.05), f64::MIN_POSITIVE);
    }

    #[test]
    fn first_update_has_no_hysteresis() {
        let mut s = TierSelector::default();
        assert_eq!(s.update(scale_for(90.0), 1.0), Tier::Compact);
        let mut s = TierSelector::default();
        assert_eq!(s.update(scale_for(200.0), 1.0), Tier::Full);
    }

    #[test]
    fn leaving_full_needs_the_dead_band() {
        let mut s = TierSelector::default();
        s.update(1.0, 1.0);
        // 96 * 0.85 = 81.6: anything above stays Full.
        assert_eq!(s.update(scale_for(85.0), 1.0), Tier::Full);
        assert_eq!(s.update(scale_for(75.0), 1.0), Tier::Compact);
        // Back up past 96 but below 96 * 1.15 = 110.4 stays Compact.
        assert_eq!(s.update(scale_for(105.0), 1.0), Tier::Compact);
        assert_eq!(s.update(scale_for(120.0), 1.0), Tier::Full);
    }

    #[test]
    fn small_deltas_near_threshold_never_flip() {
        let mut s = TierSelector::default();
        s.update(scale_for(100.0), 1.0);
        assert_eq!(s.current(), Tier::Full);
        for px in [97.0, 92.0, 88.0, 95.0, 84.0, 99.0, 90.0] {
            assert_eq!(s.update(scale_for(px), 1.0), Tier::Full, "flipped at {px} px");
        }
    }

    #[test]
    fn aggregate_tier_is_gated() {
        let mut off = TierSelector::default();
        off.update(1.0, 1.0);
        assert_eq!(off.update(scale_for(10.0), 1.0), Tier::Compact);

        let mut on = with_aggregate();
        on.update(1.0, 1.0);
        assert_eq!(on.update(scale_for(10.0), 1.0), Tier::Aggregate);
        // 36 * 1.15 = 41.4.
        assert_eq!(on.update(scale_for(40.0), 1.0), Tier::Aggregate);
        assert_eq!(on.update(scale_for(45.0), 1.0), Tier::Compact);
    }

    #[test]
    fn density_counts_toward_pixel_size() {
        let mut s = TierSelector::default();
        assert_eq!(s.update(scale_for(60.0), 1.0), Tier::Compact);
        assert_eq!(s.update(scale_for(60.0), 3.0), Tier::Full);
    }
}
