// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_layout --heading-base-level=0

//! Arbor Layout: indices derived from a placed genealogical tree.
//!
//! The external layout pass assigns every person a top-left corner. This crate
//! turns that flat list into the lookups a viewport engine needs every frame:
//!
//! - [`LayoutIndices`]: children ordered by `x`, breadth-first depths, subtree
//!   sizes, centroids, hero selection, display boxes, and bounds.
//! - [`IndexDiagnostics`]: counts of the malformed records that were ignored.
//! - [`LayoutIndices::ancestry_path`]: root-to-node walk with a cycle guard and
//!   a depth cap.
//! - [`Connection`]: elbow routing anchors for a parent and its children.
//! - [`fanout_tree`]: generated trees for tests and benchmarks.
//!
//! ## Not a layout engine
//!
//! Positions are inputs. Nothing here moves a node.
//!
//! ## Malformed input
//!
//! Building never fails and never panics. Duplicate ids keep their first
//! record, extra roots and dangling or cyclic fathers are dropped, and a list
//! without any root yields empty indices. Each case logs under the
//! `arbor::layout` target and is counted in the returned diagnostics.
//!
//! ## Example
//!
//! ```
//! use arbor_layout::{LayoutIndices, NodeId, NodeRecord};
//!
//! let (idx, diag) = LayoutIndices::build(vec![
//!     NodeRecord::new(1, 0.0, 0.0, None, 1, "Ada Lovelace"),
//!     NodeRecord::new(2, -200.0, 200.0, Some(1), 2, "Byron"),
//!     NodeRecord::new(3, 200.0, 200.0, Some(1), 2, "Clara"),
//!     NodeRecord::new(4, 200.0, 400.0, Some(3), 3, "Dora"),
//! ]);
//! assert!(diag.is_clean());
//! assert_eq!(idx.depth(NodeId(4)), Some(2));
//! assert_eq!(idx.subtree_size(NodeId(1)), Some(4));
//! assert_eq!(idx.heroes(), [NodeId(1), NodeId(3)]);
//! assert_eq!(idx.ancestry_path(NodeId(4)).as_slice(), [NodeId(1), NodeId(3), NodeId(4)]);
//! ```

#![no_std]

extern crate alloc;

pub mod ancestry;
pub mod connection;
pub mod indices;
pub mod node;
pub mod synthetic;

pub use ancestry::{AncestryLink, AncestryPath, MAX_ANCESTRY_DEPTH, walk_ancestry};
pub use connection::Connection;
pub use indices::{Children, IndexDiagnostics, LayoutIndices};
pub use node::{NodeFlags, NodeId, NodeRecord, NodeRole};
pub use synthetic::fanout_tree;
