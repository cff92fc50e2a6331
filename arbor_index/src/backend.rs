// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::Aabb2D;
use core::fmt::Debug;

/// Spatial backend abstraction used by `IndexGeneric`.
///
/// Backends are filled once per data generation and then only queried; there is
/// no incremental update path. Rebuild by calling [`Backend::clear`] and
/// re-inserting every slot.
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Insert a new slot into the spatial structure.
    fn insert(&mut self, slot: usize, aabb: Aabb2D<T>);

    /// Clear all spatial structures.
    fn clear(&mut self);

    /// Query slots whose AABB contains the point.
    fn query_point<'a>(&'a self, x: T, y: T) -> Box<dyn Iterator<Item = usize> + 'a>;

    /// Query slots whose AABB intersects the rectangle.
    ///
    /// Slots are yielded in ascending order so that truncating the iterator is
    /// deterministic.
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;
}
