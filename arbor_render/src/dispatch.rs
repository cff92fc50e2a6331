// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-tier frame assembly.

use arbor_layout::{LayoutIndices, NodeFlags, NodeId};
use arbor_lod::{ImageBucketSelector, ImageConfig, Tier, required_photo_px};
use arbor_view::Stage;
use kurbo::{Point, Size};
use log::trace;

use crate::card::{NodeView, draw_card, draw_pill, photo_circle};
use crate::chips::{HeroChip, draw_chips, hero_chip_at, hero_chips};
use crate::config::RenderConfig;
use crate::display::DisplayList;
use crate::edges::{EdgeIndex, draw_edges};
use crate::fonts::TypefaceRegistry;
use crate::highlight::AncestryHighlighter;

/// Everything one frame is drawn from.
#[derive(Copy, Clone, Debug)]
pub struct FrameInput<'a> {
    /// Current indices.
    pub indices: &'a LayoutIndices,
    /// Ids returned by the visible-set query, in draw order.
    pub visible: &'a [NodeId],
    /// Gridded connections for `indices`. Without it every parent is checked.
    pub edges: Option<&'a EdgeIndex>,
    /// Whether the visible-set query hit its cap.
    pub truncated_nodes: bool,
    /// Camera.
    pub stage: Stage,
    /// Viewport in screen pixels.
    pub viewport: Size,
    /// Device pixels per screen pixel.
    pub pixel_density: f64,
    /// Committed tier.
    pub tier: Tier,
    /// Frame time.
    pub now_ms: u64,
}

/// Counts reported with each frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameStats {
    /// Tier drawn.
    pub tier: Tier,
    /// Nodes handed to the dispatcher.
    pub visible_nodes: usize,
    /// Tier 1 cards drawn.
    pub cards: usize,
    /// Tier 2 pills drawn.
    pub pills: usize,
    /// Tier 3 chips drawn.
    pub hero_chips: usize,
    /// Photo requests emitted.
    pub image_requests: usize,
    /// Edge segments drawn.
    pub edge_segments: usize,
    /// Glow commands drawn for the ancestry highlight.
    pub glow_layers: usize,
    /// The visible-set query hit its cap.
    pub truncated_nodes: bool,
    /// The edge pass hit its cap.
    pub truncated_edges: bool,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            tier: Tier::Full,
            visible_nodes: 0,
            cards: 0,
            pills: 0,
            hero_chips: 0,
            image_requests: 0,
            edge_segments: 0,
            glow_layers: 0,
            truncated_nodes: false,
            truncated_edges: false,
        }
    }
}

/// Turns a [`FrameInput`] into draw commands for its tier.
///
/// Owns the per-node photo bucket state, since buckets are picked as cards
/// are drawn, and the chips of the last tier 3 frame for hit testing.
#[derive(Clone, Debug)]
pub struct TierDispatcher {
    config: RenderConfig,
    images: ImageBucketSelector<NodeId>,
    chips: Vec<HeroChip>,
}

impl Default for TierDispatcher {
    fn default() -> Self {
        Self::new(RenderConfig::default(), ImageConfig::default())
    }
}

impl TierDispatcher {
    /// A dispatcher with no photo history.
    pub fn new(config: RenderConfig, images: ImageConfig) -> Self {
        Self {
            config,
            images: ImageBucketSelector::new(images),
            chips: Vec::new(),
        }
    }

    /// Render tuning.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Photo bucket state.
    pub fn images(&self) -> &ImageBucketSelector<NodeId> {
        &self.images
    }

    /// Forget photo buckets of nodes no longer indexed.
    pub fn prune_images(&mut self, indices: &LayoutIndices) {
        let before = self.images.len();
        self.images.prune(|id| indices.contains(id));
        trace!(target: "arbor::render", "pruned {} photo buckets", before - self.images.len());
    }

    /// Chips drawn by the last tier 3 frame; empty in other tiers.
    pub fn hero_chips(&self) -> &[HeroChip] {
        &self.chips
    }

    /// Hero whose chip is under `world`, if the last frame drew chips.
    pub fn hero_chip_at(&self, world: Point) -> Option<NodeId> {
        hero_chip_at(&self.chips, world)
    }

    /// Draw a frame into `list`, replacing its contents.
    ///
    /// Order: edges, ancestry glow, nodes. Tier 3 draws glow and chips only.
    pub fn dispatch(
        &mut self,
        input: &FrameInput<'_>,
        highlight: Option<&AncestryHighlighter>,
        list: &mut DisplayList,
    ) -> FrameStats {
        list.reset(input.stage.transform());
        self.chips.clear();
        let faces = TypefaceRegistry::global().typefaces();
        let palette = &self.config.palette;
        let scale = input.stage.safe_scale();
        let mut stats = FrameStats {
            tier: input.tier,
            visible_nodes: input.visible.len(),
            truncated_nodes: input.truncated_nodes,
            ..FrameStats::default()
        };

        if input.tier == Tier::Aggregate {
            if let Some(h) = highlight {
                stats.glow_layers = h.draw(input.indices, palette, input.now_ms, list);
            }
            self.chips = hero_chips(input.indices, scale, &self.config);
            draw_chips(list, &self.chips, scale, &self.config, faces);
            stats.hero_chips = self.chips.len();
            return stats;
        }

        let visible_rect = input.stage.visible_world_rect(input.viewport);
        let edges = draw_edges(input.indices, input.edges, visible_rect, &self.config, list);
        stats.edge_segments = edges.segments;
        stats.truncated_edges = edges.truncated;
        if let Some(h) = highlight {
            stats.glow_layers = h.draw(input.indices, palette, input.now_ms, list);
        }

        for &id in input.visible {
            let Some(node) = NodeView::new(input.indices, id) else {
                continue;
            };
            if input.tier == Tier::Compact {
                draw_pill(list, &node, &self.config, faces);
                stats.pills += 1;
                continue;
            }
            let bucket = node
                .flags
                .contains(NodeFlags::HAS_PHOTO)
                .then(|| {
                    let diameter = photo_circle(node.rect, self.config.photo_inset).radius * 2.0;
                    let px = required_photo_px(diameter, scale, input.pixel_density);
                    self.images.select(id, px, input.now_ms)
                })
                .filter(|&b| b > 0);
            draw_card(list, &node, bucket, &self.config, faces);
            stats.cards += 1;
            if bucket.is_some() {
                stats.image_requests += 1;
            }
        }
        trace!(
            target: "arbor::render",
            "tier {} frame: {} cards, {} pills, {} edge segments",
            input.tier.number(),
            stats.cards,
            stats.pills,
            stats.edge_segments
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::DrawCmd;
    use arbor_layout::NodeRecord;
    use arbor_view::center_on_stage;

    fn trio() -> LayoutIndices {
        LayoutIndices::build(vec![
            NodeRecord::new(1, 0.0, 0.0, None, 1, "Ada Lovelace").with_photo("ada.jpg"),
            NodeRecord::new(2, -200.0, 300.0, Some(1), 2, "Byron King"),
            NodeRecord::new(3, 200.0, 300.0, Some(1), 2, "Clara Noel"),
            NodeRecord::new(4, 200.0, 600.0, Some(3), 3, "Dora Noel"),
        ])
        .0
    }

    fn input<'a>(idx: &'a LayoutIndices, visible: &'a [NodeId], tier: Tier, scale: f64) -> FrameInput<'a> {
        let viewport = Size::new(800.0, 600.0);
        FrameInput {
            indices: idx,
            visible,
            edges: None,
            truncated_nodes: false,
            stage: center_on_stage(Point::new(120.0, 300.0), scale, viewport),
            viewport,
            pixel_density: 2.0,
            tier,
            now_ms: 0,
        }
    }

    #[test]
    fn full_tier_draws_cards_with_photo_buckets() {
        let idx = trio();
        let visible = idx.ids().to_vec();
        let mut d = TierDispatcher::default();
        let mut list = DisplayList::default();
        let stats = d.dispatch(&input(&idx, &visible, Tier::Full, 1.0), None, &mut list);
        assert_eq!(stats.cards, 4);
        assert_eq!(stats.image_requests, 1);
        // Root photo: 120 - 2 * 10 = 100 units at scale 1 and density 2 is 200 px.
        assert_eq!(d.images().bucket(NodeId(1)), Some(256));
        assert!(stats.edge_segments > 0);
        // Edges come first.
        assert!(matches!(list.world()[0], DrawCmd::Path { .. }));
    }

    #[test]
    fn compact_tier_draws_pills_without_photos() {
        let idx = trio();
        let visible = idx.ids().to_vec();
        let mut d = TierDispatcher::default();
        let mut list = DisplayList::default();
        let stats = d.dispatch(&input(&idx, &visible, Tier::Compact, 0.4), None, &mut list);
        assert_eq!(stats.pills, 4);
        assert_eq!(stats.cards, 0);
        assert_eq!(list.image_requests().count(), 0);
        assert!(list.texts().all(|t| !t.contains(' ')));
    }

    #[test]
    fn aggregate_tier_draws_chips_and_hit_tests() {
        let idx = trio();
        let mut d = TierDispatcher::default();
        let mut list = DisplayList::default();
        let stats = d.dispatch(&input(&idx, &[], Tier::Aggregate, 0.05), None, &mut list);
        assert_eq!(stats.hero_chips, idx.heroes().len());
        assert_eq!(stats.edge_segments, 0);
        let root_centroid = idx.centroid(NodeId(1)).unwrap();
        assert!(d.hero_chip_at(root_centroid).is_some());

        // Leaving tier 3 drops the chips.
        d.dispatch(&input(&idx, &[], Tier::Full, 1.0), None, &mut list);
        assert!(d.hero_chips().is_empty());
        assert_eq!(d.hero_chip_at(root_centroid), None);
    }

    #[test]
    fn highlight_draws_between_edges_and_nodes() {
        let idx = trio();
        let visible = idx.ids().to_vec();
        let mut h = AncestryHighlighter::default();
        h.highlight(&idx, NodeId(4), 0);
        let mut d = TierDispatcher::default();
        let mut list = DisplayList::default();
        let mut frame = input(&idx, &visible, Tier::Full, 1.0);
        frame.now_ms = 300;
        let stats = d.dispatch(&frame, Some(&h), &mut list);
        assert_eq!(stats.glow_layers, 4);
        let first_glow = list
            .world()
            .iter()
            .position(|c| matches!(c, DrawCmd::Glow { .. }))
            .unwrap();
        let first_fill = list
            .world()
            .iter()
            .position(|c| matches!(c, DrawCmd::Fill { .. }))
            .unwrap();
        assert!(first_glow < first_fill);
    }

    #[test]
    fn prune_forgets_removed_nodes() {
        let idx = trio();
        let visible = idx.ids().to_vec();
        let mut d = TierDispatcher::default();
        let mut list = DisplayList::default();
        d.dispatch(&input(&idx, &visible, Tier::Full, 1.0), None, &mut list);
        let smaller = LayoutIndices::build(vec![NodeRecord::new(9, 0.0, 0.0, None, 1, "Zed")]).0;
        d.prune_images(&smaller);
        assert!(d.images().is_empty());
    }
}
