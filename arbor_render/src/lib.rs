// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_render --heading-base-level=0

//! Arbor Render: turning the visible set into draw commands.
//!
//! The output is a [`DisplayList`] of [`DrawCmd`]s with kurbo geometry and
//! peniko colors. The host replays it with whatever 2D backend it has; text
//! shaping and image decoding stay on the host side.
//!
//! What gets drawn depends on the committed [`arbor_lod::Tier`]:
//!
//! - **Full**: cards with border, optional circular photo (carrying the photo
//!   resolution bucket), generation badge, full name, and decorations for the
//!   root and for second-generation branch heads.
//! - **Compact**: pills with the first name only.
//! - **Aggregate**: one [`HeroChip`] per hero at its subtree centroid.
//!
//! Elbow edges are packed into path commands of bounded size by
//! [`EdgeBatcher`] and capped per frame. The [`AncestryHighlighter`] draws the
//! root-to-node path as layered glow sharing a single [`Fade`].
//!
//! ```
//! use arbor_layout::{LayoutIndices, NodeRecord};
//! use arbor_lod::Tier;
//! use arbor_render::{DisplayList, FrameInput, TierDispatcher};
//! use arbor_view::center_on_stage;
//! use kurbo::{Point, Size};
//!
//! let (indices, _) = LayoutIndices::build(vec![
//!     NodeRecord::new(1, 0.0, 0.0, None, 1, "Ada Lovelace"),
//!     NodeRecord::new(2, 0.0, 300.0, Some(1), 2, "Byron King"),
//! ]);
//! let viewport = Size::new(800.0, 600.0);
//! let visible = indices.ids().to_vec();
//! let input = FrameInput {
//!     indices: &indices,
//!     visible: &visible,
//!     edges: None,
//!     truncated_nodes: false,
//!     stage: center_on_stage(Point::new(120.0, 200.0), 1.0, viewport),
//!     viewport,
//!     pixel_density: 1.0,
//!     tier: Tier::Full,
//!     now_ms: 0,
//! };
//!
//! let mut dispatcher = TierDispatcher::default();
//! let mut list = DisplayList::default();
//! let stats = dispatcher.dispatch(&input, None, &mut list);
//! assert_eq!(stats.cards, 2);
//! assert!(list.texts().any(|t| t == "Byron King"));
//! ```

mod card;
mod chips;
mod config;
mod dispatch;
mod display;
mod edges;
mod fonts;
mod highlight;
mod overlay;

pub use card::{Decorations, NodeView, draw_card, draw_pill, photo_circle, pill_shape};
pub use chips::{HeroChip, draw_chips, hero_chip_at, hero_chips};
pub use config::{HighlightConfig, Palette, RenderConfig};
pub use dispatch::{FrameInput, FrameStats, TierDispatcher};
pub use display::{DisplayList, DrawCmd, ImageRequest, Primitive, TextAlign};
pub use edges::{EdgeBatcher, EdgeIndex, EdgeStats, draw_edges};
pub use fonts::{RegistryError, Typeface, TypefaceRegistry, TypefaceSet};
pub use highlight::{AncestryHighlighter, Fade, GapGroup};
pub use overlay::DebugOverlay;
