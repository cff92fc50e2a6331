// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Development overlay with frame counters.

use std::borrow::Cow;
use std::fmt;

use arbor_lod::Tier;
use arbor_view::Stage;
use kurbo::{Point, Rect, RoundedRect};

use crate::config::RenderConfig;
use crate::dispatch::FrameStats;
use crate::display::{DisplayList, DrawCmd, Primitive, TextAlign};
use crate::fonts::TypefaceSet;

/// Snapshot of what the last frame did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DebugOverlay {
    /// Indexed nodes.
    pub node_count: usize,
    /// Nodes returned by the visible-set query.
    pub visible: usize,
    /// Edge segments drawn.
    pub edge_segments: usize,
    /// Tier in effect.
    pub tier: Tier,
    /// Camera at commit time.
    pub stage: Stage,
    /// The visible-set query hit its cap.
    pub truncated_nodes: bool,
    /// The edge pass hit its cap.
    pub truncated_edges: bool,
}

impl DebugOverlay {
    /// Overlay for a committed frame.
    pub fn new(node_count: usize, stage: Stage, stats: &FrameStats) -> Self {
        Self {
            node_count,
            visible: stats.visible_nodes,
            edge_segments: stats.edge_segments,
            tier: stats.tier,
            stage,
            truncated_nodes: stats.truncated_nodes,
            truncated_edges: stats.truncated_edges,
        }
    }

    /// Overlay text, one entry per line.
    pub fn lines(&self) -> [String; 4] {
        let flag = |b: bool| if b { " (capped)" } else { "" };
        [
            format!("nodes {} visible {}{}", self.node_count, self.visible, flag(self.truncated_nodes)),
            format!("edges {}{}", self.edge_segments, flag(self.truncated_edges)),
            format!("tier {}", self.tier.number()),
            format!(
                "cam {:.1},{:.1} x{:.3}",
                self.stage.translate.x, self.stage.translate.y, self.stage.scale
            ),
        ]
    }

    /// Draw into the screen layer at the top-left corner.
    pub fn draw(&self, list: &mut DisplayList, config: &RenderConfig, faces: &TypefaceSet) {
        let size = config.overlay_font_px;
        let line_h = size * 1.4;
        let lines = self.lines();
        let panel = Rect::new(8.0, 8.0, 8.0 + size * 18.0, 8.0 + line_h * 4.0 + size);
        list.push_screen(DrawCmd::Fill {
            shape: Primitive::RoundedRect(RoundedRect::from_rect(panel, 6.0)),
            color: config.palette.overlay_fill,
        });
        let mut y = panel.y0 + size * 0.5;
        for line in lines {
            y += line_h;
            list.push_screen(DrawCmd::Text {
                text: Cow::Owned(line),
                origin: Point::new(panel.x0 + size * 0.5, y),
                size,
                face: faces.regular.clone(),
                color: config.palette.overlay_text,
                align: TextAlign::Start,
                max_width: None,
            });
        }
    }
}

impl fmt::Display for DebugOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.lines();
        write!(f, "{a} | {b} | {c} | {d}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn lines_flag_truncation() {
        let stats = FrameStats {
            tier: Tier::Compact,
            visible_nodes: 400,
            edge_segments: 1500,
            truncated_nodes: true,
            truncated_edges: true,
            ..FrameStats::default()
        };
        let o = DebugOverlay::new(500, Stage::new(Vec2::new(10.0, -4.0), 0.5), &stats);
        assert_eq!(
            o.to_string(),
            "nodes 500 visible 400 (capped) | edges 1500 (capped) | tier 2 | cam 10.0,-4.0 x0.500"
        );
    }

    #[test]
    fn draws_only_to_screen_layer() {
        let o = DebugOverlay::new(3, Stage::IDENTITY, &FrameStats::default());
        let mut list = DisplayList::default();
        o.draw(&mut list, &RenderConfig::default(), &TypefaceSet::default());
        assert!(list.world().is_empty());
        assert_eq!(list.screen().len(), 5);
    }
}
