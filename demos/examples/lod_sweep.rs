// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sweep the zoom down and back up, printing tier and photo bucket changes.
//!
//! The dead band shows up as different crossing points on the way out and
//! on the way back in.
//!
//! Run:
//! - `cargo run -p arbor_demos --example lod_sweep`

use arbor_lod::{ImageBucketSelector, LodConfig, TierSelector, required_photo_px};

const PHOTO_DIAMETER: f64 = 140.0;
const DENSITY: f64 = 3.0;

fn main() {
    let mut tiers = TierSelector::new(LodConfig {
        aggregate_tier: true,
        ..LodConfig::default()
    });
    let mut photos = ImageBucketSelector::default();

    let mut scales: Vec<f64> = (0..=60).map(|i| 2.0 * 0.93_f64.powi(i)).collect();
    let back: Vec<f64> = scales.iter().rev().skip(1).copied().collect();
    scales.extend(back);

    let mut last = None;
    let mut last_bucket = None;
    for (frame, &scale) in scales.iter().enumerate() {
        let now = frame as u64 * 16;
        let tier = tiers.update(scale, DENSITY);
        let px = required_photo_px(PHOTO_DIAMETER, scale, DENSITY);
        let bucket = photos.select(0_u32, px, now);
        if last != Some(tier) || last_bucket != Some(bucket) {
            println!(
                "{now:>5} ms  scale {scale:.3}  node {:>6.1} px  tier {}  photo {bucket} px{}",
                tiers.pixel_size(scale, DENSITY),
                tier.number(),
                if photos.has_pending_upgrade(0) { " (upgrade pending)" } else { "" },
            );
        }
        last = Some(tier);
        last_bucket = Some(bucket);
    }
}
