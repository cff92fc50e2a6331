// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tier 3 hero chips.

use std::borrow::Cow;

use arbor_layout::{LayoutIndices, NodeId};
use arbor_view::MIN_SCALE;
use kurbo::{Circle, Point};

use crate::config::RenderConfig;
use crate::display::{DisplayList, DrawCmd, Primitive, TextAlign};
use crate::fonts::TypefaceSet;

/// A chip summarizing a hero's subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroChip {
    /// The hero.
    pub node: NodeId,
    /// Subtree centroid in layout space.
    pub center: Point,
    /// Radius in layout space at the scale the chip was built for.
    pub radius: f64,
    /// First name of the hero.
    pub label: String,
    /// Number of people in the subtree.
    pub subtree_size: u32,
}

impl HeroChip {
    /// Whether `world` falls on the chip.
    pub fn contains(&self, world: Point) -> bool {
        (world - self.center).hypot2() <= self.radius * self.radius
    }
}

/// Chips for every hero, in hero order, sized for `scale`.
pub fn hero_chips(indices: &LayoutIndices, scale: f64, config: &RenderConfig) -> Vec<HeroChip> {
    let radius = config.chip_radius_px / scale.max(MIN_SCALE);
    indices
        .heroes()
        .iter()
        .filter_map(|&id| {
            Some(HeroChip {
                node: id,
                center: indices.centroid(id)?,
                radius,
                label: indices.node(id)?.first_name().to_owned(),
                subtree_size: indices.subtree_size(id)?,
            })
        })
        .collect()
}

/// The topmost chip under `world`. Chips drawn later are on top.
pub fn hero_chip_at(chips: &[HeroChip], world: Point) -> Option<NodeId> {
    chips.iter().rev().find(|c| c.contains(world)).map(|c| c.node)
}

/// Draw the chips. `scale` converts on-screen text sizes to layout units.
pub fn draw_chips(
    list: &mut DisplayList,
    chips: &[HeroChip],
    scale: f64,
    config: &RenderConfig,
    faces: &TypefaceSet,
) {
    let p = &config.palette;
    let size = config.chip_font_px / scale.max(MIN_SCALE);
    for chip in chips {
        list.push(DrawCmd::Fill {
            shape: Primitive::Circle(Circle::new(chip.center, chip.radius)),
            color: p.chip_fill,
        });
        list.push(DrawCmd::Text {
            text: Cow::Owned(chip.label.clone()),
            origin: Point::new(chip.center.x, chip.center.y - size * 0.2),
            size,
            face: faces.bold.clone(),
            color: p.chip_text,
            align: TextAlign::Center,
            max_width: Some(chip.radius * 1.6),
        });
        list.push(DrawCmd::Text {
            text: Cow::Owned(chip.subtree_size.to_string()),
            origin: Point::new(chip.center.x, chip.center.y + size * 1.0),
            size: size * 0.9,
            face: faces.regular.clone(),
            color: p.chip_text,
            align: TextAlign::Center,
            max_width: None,
        });
    }
}
