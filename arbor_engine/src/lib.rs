// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_engine --heading-base-level=0

//! Arbor Engine: the viewport engine for genealogical trees.
//!
//! [`Engine`] ties the workspace together:
//!
//! - [`arbor_layout`] derives depths, subtree sizes, centroids, heroes and
//!   bounds from the node list, and [`arbor_index`] grids the display boxes.
//! - [`arbor_view`] moves the camera under pan, pinch, momentum and eased
//!   animations, never letting the view escape the tree for long.
//! - [`arbor_lod`] picks the detail tier and photo resolutions without
//!   flickering at thresholds.
//! - [`arbor_render`] turns the visible set into a display list.
//!
//! Work is split in two paths. The transform path runs on every gesture
//! sample and tick and only moves the camera; each change is published as a
//! versioned [`TransformSnapshot`] into a [`SnapshotSlot`]. The render-state
//! path copies the latest snapshot and recomputes the visible set, tier and
//! draw list only when the [`RenderThrottle`] says the view moved enough.
//!
//! ```
//! use arbor_engine::{Engine, EngineEvent};
//! use arbor_layout::{NodeId, NodeRecord};
//! use arbor_view::GestureInput;
//! use kurbo::{Point, Size};
//!
//! let mut engine = Engine::default();
//! engine.set_viewport(Size::new(800.0, 600.0), 2.0);
//! engine.load_nodes(vec![
//!     NodeRecord::new(1, 0.0, 0.0, None, 1, "Ada Lovelace"),
//!     NodeRecord::new(2, 0.0, 300.0, Some(1), 2, "Byron King"),
//! ]);
//!
//! let frame = engine.tick(0).expect("first tick commits");
//! assert_eq!(frame.visible.len(), 2);
//!
//! // Tap the child.
//! let at = engine.camera().world_to_screen(Point::new(80.0, 330.0));
//! engine.handle_gesture(GestureInput::Tap { position: at }, 100);
//! assert_eq!(engine.drain_events(), [EngineEvent::Selected(NodeId(2))]);
//! ```

mod config;
mod engine;
mod events;
mod scene;
mod snapshot;

pub use config::{EngineConfig, GridConfig, ThrottleConfig};
pub use engine::{Engine, Frame};
pub use events::EngineEvent;
pub use scene::{Scene, VisibleSet, query_rect};
pub use snapshot::{CommitReason, RenderThrottle, SnapshotSlot, TransformSnapshot};

pub(crate) const TARGET: &str = "arbor::engine";
