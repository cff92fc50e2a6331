// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Photo resolution buckets per node, with debounced upgrades.

use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

use crate::config::ImageConfig;

const TARGET: &str = "arbor::lod";

/// Smallest bucket that holds `required_px`, saturating at the largest.
///
/// Returns 0 for an empty ladder.
pub fn target_bucket(required_px: f64, ladder: &[u32]) -> u32 {
    let Some(&largest) = ladder.last() else {
        return 0;
    };
    ladder
        .iter()
        .copied()
        .find(|&b| f64::from(b) >= required_px)
        .unwrap_or(largest)
}

/// On-screen photo size in device pixels.
pub fn required_photo_px(diameter_world: f64, scale: f64, pixel_density: f64) -> f64 {
    let px = diameter_world * scale * pixel_density;
    if px.is_finite() { px.max(0.0) } else { 0.0 }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    bucket: u32,
    since_ms: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    current: u32,
    pending: Option<Pending>,
}

/// Tracks which photo resolution each node is using.
///
/// - The first request for a key commits its target bucket immediately.
/// - An upgrade needs the requirement to exceed `current * headroom`, and
///   commits only after the larger requirement has persisted for the debounce
///   window. A requirement that falls back cancels the pending upgrade.
/// - A downgrade commits immediately once the requirement fits a smaller
///   bucket with the same headroom to spare.
#[derive(Clone, Debug)]
pub struct ImageBucketSelector<K> {
    config: ImageConfig,
    entries: HashMap<K, Entry>,
}

impl<K: Copy + Eq + Hash> Default for ImageBucketSelector<K> {
    fn default() -> Self {
        Self::new(ImageConfig::default())
    }
}

impl<K: Copy + Eq + Hash> ImageBucketSelector<K> {
    /// Create a selector. The bucket ladder is sorted and deduplicated.
    pub fn new(mut config: ImageConfig) -> Self {
        config.buckets.sort_unstable();
        config.buckets.dedup();
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Tuning in effect.
    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// Committed bucket for `key`, if it has been requested.
    pub fn bucket(&self, key: K) -> Option<u32> {
        self.entries.get(&key).map(|e| e.current)
    }

    /// Bucket `key` is waiting to upgrade to, if its debounce window is running.
    pub fn pending_upgrade(&self, key: K) -> Option<u32> {
        self.entries.get(&key)?.pending.map(|p| p.bucket)
    }

    /// Whether `key` has an upgrade waiting out its debounce window.
    pub fn has_pending_upgrade(&self, key: K) -> bool {
        self.pending_upgrade(key).is_some()
    }

    /// Whether any key has an upgrade waiting out its debounce window.
    pub fn has_pending(&self) -> bool {
        self.entries.values().any(|e| e.pending.is_some())
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Report the current requirement for `key` and return the committed bucket.
    pub fn select(&mut self, key: K, required_px: f64, now_ms: u64) -> u32 {
        let ladder = &self.config.buckets;
        let headroom = self.config.headroom.max(1.0);
        let target = target_bucket(required_px, ladder);
        let Some(entry) = self.entries.get_mut(&key) else {
            self.entries.insert(
                key,
                Entry {
                    current: target,
                    pending: None,
                },
            );
            return target;
        };

        if target > entry.current && required_px > f64::from(entry.current) * headroom {
            let since_ms = entry.pending.map_or(now_ms, |p| p.since_ms);
            if now_ms.saturating_sub(since_ms) >= self.config.upgrade_debounce_ms {
                trace!(target: TARGET, "bucket {} -> {target}", entry.current);
                entry.current = target;
                entry.pending = None;
            } else {
                entry.pending = Some(Pending {
                    bucket: target,
                    since_ms,
                });
            }
            return entry.current;
        }

        entry.pending = None;
        let relaxed = target_bucket(required_px * headroom, ladder);
        if relaxed < entry.current {
            trace!(target: TARGET, "bucket {} -> {relaxed}", entry.current);
            entry.current = relaxed;
        }
        entry.current
    }

    /// Drop entries whose key no longer passes `keep`.
    pub fn prune(&mut self, mut keep: impl FnMut(K) -> bool) {
        self.entries.retain(|k, _| keep(*k));
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
