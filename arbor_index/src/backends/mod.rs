// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans (small, simple, exact reference).
//! - `grid`: uniform grid over `f64` coordinates keyed by integer cell, with
//!   origin offsets so negative layout coordinates work.

pub mod flatvec;
pub mod grid;

pub use flatvec::FlatVec;
pub use grid::Grid;
