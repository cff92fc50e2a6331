// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generated trees for tests, benchmarks, and demos.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use crate::node::NodeRecord;

/// Vertical distance between generations in [`fanout_tree`].
pub const GENERATION_SPACING: f64 = 240.0;

/// A complete tree of `n` nodes in breadth-first id order.
///
/// Node `i` (id `i + 1`) has father `(i - 1) / fanout`. Each generation is laid
/// out left to right, `spacing` apart, [`GENERATION_SPACING`] below its
/// parents. Every fourth node carries a photo.
pub fn fanout_tree(n: usize, fanout: usize, spacing: f64) -> Vec<NodeRecord> {
    let fanout = fanout.max(1);
    let mut depth_of = vec![0_u32; n];
    let mut slot_in_row: Vec<u32> = Vec::new();
    (0..n)
        .map(|i| {
            let father = (i > 0).then(|| (i - 1) / fanout);
            let depth = father.map_or(0, |f| depth_of[f] + 1);
            depth_of[i] = depth;
            let row = depth as usize;
            if slot_in_row.len() <= row {
                slot_in_row.resize(row + 1, 0);
            }
            let col = slot_in_row[row];
            slot_in_row[row] += 1;
            let r = NodeRecord::new(
                i as u64 + 1,
                f64::from(col) * spacing,
                f64::from(depth) * GENERATION_SPACING,
                father.map(|f| f as u64 + 1),
                depth + 1,
                format!("Person {i}"),
            );
            if i % 4 == 0 { r.with_photo(format!("p/{i}.jpg")) } else { r }
        })
        .collect()
}
