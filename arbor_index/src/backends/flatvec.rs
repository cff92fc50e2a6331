// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear-scan backend.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::Aabb2D;

/// Flat vector backend with linear scans.
///
/// Used as the exact reference when validating the grid, and as a fallback
/// for very small trees where cell bookkeeping does not pay off.
pub struct FlatVec<T: Copy + PartialOrd + Debug> {
    entries: Vec<Option<Aabb2D<T>>>,
}

impl<T: Copy + PartialOrd + Debug> Default for FlatVec<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + PartialOrd + Debug> Debug for FlatVec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlatVec")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T: Copy + PartialOrd + Debug> Backend<T> for FlatVec<T> {
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>) {
        if self.entries.len() <= slot {
            self.entries.resize_with(slot + 1, || None);
        }
        self.entries[slot] = Some(aabb);
    }
    fn clear(&mut self) {
        self.entries.clear();
    }
    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.entries
                .iter()
                .enumerate()
                .filter(move |(_, e)| e.is_some_and(|a| a.contains_point(x, y)))
                .map(|(i, _)| i),
        )
    }
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        Box::new(
            self.entries
                .iter()
                .enumerate()
                .filter(move |(_, e)| e.is_some_and(|a| a.overlaps(&rect)))
                .map(|(i, _)| i),
        )
    }
}
