// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_lod --heading-base-level=0

//! Arbor LOD: deciding how much detail to draw at a zoom level.
//!
//! Two selectors, both stateful so they can refuse to flicker:
//!
//! - [`TierSelector`] maps a camera scale and pixel density to a [`Tier`].
//!   Scale is first snapped to a 5 % multiplicative grid by
//!   [`quantize_scale`], then compared against thresholds with a dead band.
//! - [`ImageBucketSelector`] keeps a photo resolution per node from a fixed
//!   ladder, upgrading only after the need persists and downgrading at once.
//!
//! ```
//! use arbor_lod::{Tier, TierSelector};
//!
//! let mut tiers = TierSelector::default();
//! assert_eq!(tiers.update(1.0, 1.0), Tier::Full);
//! // 160 px * 0.55 = 88 px is under 96 but inside the dead band.
//! assert_eq!(tiers.update(0.55, 1.0), Tier::Full);
//! assert_eq!(tiers.update(0.4, 1.0), Tier::Compact);
//! ```

mod config;
mod image;
mod tier;

pub use config::{ImageConfig, LodConfig};
pub use image::{ImageBucketSelector, required_photo_px, target_bucket};
pub use tier::{Tier, TierSelector, quantize_scale};
