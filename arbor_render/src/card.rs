// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tier 1 cards and tier 2 pills.

use std::borrow::Cow;

use arbor_layout::{LayoutIndices, NodeFlags, NodeId, NodeRecord, NodeRole};
use kurbo::{Circle, Point, Rect, RoundedRect};

use crate::config::RenderConfig;
use crate::display::{DisplayList, DrawCmd, ImageRequest, Primitive, TextAlign};
use crate::fonts::TypefaceSet;

bitflags::bitflags! {
    /// Optional parts of a card.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Decorations: u8 {
        /// Accent outline and outer ring of the root.
        const ROOT_RING  = 0b0000_0001;
        /// Accent bar along the top of a second-generation card with children.
        const BRANCH_BAR = 0b0000_0010;
        /// Circular photo on the left.
        const PHOTO      = 0b0000_0100;
        /// Generation number in the top-right corner.
        const BADGE      = 0b0000_1000;
    }
}

impl Decorations {
    /// Parts drawn for a node with `role` and `flags`.
    pub fn for_node(role: NodeRole, flags: NodeFlags) -> Self {
        let mut d = Self::BADGE;
        if flags.contains(NodeFlags::ROOT) {
            d |= Self::ROOT_RING;
        }
        if role == NodeRole::SecondGeneration {
            d |= Self::BRANCH_BAR;
        }
        if flags.contains(NodeFlags::HAS_PHOTO) {
            d |= Self::PHOTO;
        }
        d
    }
}

/// Everything the painters need to know about one node.
#[derive(Copy, Clone, Debug)]
pub struct NodeView<'a> {
    /// The record.
    pub record: &'a NodeRecord,
    /// Display box in layout space.
    pub rect: Rect,
    /// Role.
    pub role: NodeRole,
    /// Derived flags.
    pub flags: NodeFlags,
}

impl<'a> NodeView<'a> {
    /// View of `id`, or `None` if it is not indexed.
    pub fn new(indices: &'a LayoutIndices, id: NodeId) -> Option<Self> {
        Some(Self {
            record: indices.node(id)?,
            rect: indices.display_rect(id)?,
            role: indices.role(id)?,
            flags: indices.flags(id),
        })
    }

    /// Decorations a card for this node carries.
    pub fn decorations(&self) -> Decorations {
        Decorations::for_node(self.role, self.flags)
    }
}

/// Circular photo mask of a card.
pub fn photo_circle(rect: Rect, inset: f64) -> Circle {
    let d = (rect.height() - 2.0 * inset).max(0.0);
    Circle::new((rect.x0 + inset + d * 0.5, rect.center().y), d * 0.5)
}

/// Draw a full card. `bucket` is the photo resolution, if the node has a photo.
pub fn draw_card(
    list: &mut DisplayList,
    node: &NodeView<'_>,
    bucket: Option<u32>,
    config: &RenderConfig,
    faces: &TypefaceSet,
) -> Decorations {
    let p = &config.palette;
    let rect = node.rect;
    let r = config.card_corner_radius;
    let deco = node.decorations();
    let body = RoundedRect::from_rect(rect, r);

    list.push(DrawCmd::Fill {
        shape: Primitive::RoundedRect(body),
        color: p.card_fill,
    });
    if deco.contains(Decorations::ROOT_RING) {
        list.push(DrawCmd::Stroke {
            shape: Primitive::RoundedRect(body),
            color: p.root_accent,
            width: config.root_border_width,
        });
        let gap = config.root_border_width * 2.0;
        list.push(DrawCmd::Stroke {
            shape: Primitive::RoundedRect(RoundedRect::from_rect(rect.inflate(gap, gap), r + gap)),
            color: p.root_accent,
            width: config.card_border_width,
        });
    } else {
        list.push(DrawCmd::Stroke {
            shape: Primitive::RoundedRect(body),
            color: p.card_border,
            width: config.card_border_width,
        });
    }
    if deco.contains(Decorations::BRANCH_BAR) {
        let bar = Rect::new(rect.x0 + r, rect.y0, rect.x1 - r, rect.y0 + 5.0);
        list.push(DrawCmd::Fill {
            shape: Primitive::Rect(bar),
            color: p.branch_accent,
        });
    }

    let inset = config.photo_inset;
    let mut text_x = rect.x0 + inset * 1.5;
    if deco.contains(Decorations::PHOTO) {
        let clip = photo_circle(rect, inset);
        list.push(DrawCmd::Fill {
            shape: Primitive::Circle(clip),
            color: p.photo_placeholder,
        });
        if let (Some(url), Some(bucket)) = (node.record.photo_url.as_ref(), bucket) {
            list.push(DrawCmd::Image(ImageRequest {
                node: node.record.id,
                url: url.clone(),
                clip,
                bucket,
            }));
        }
        text_x = clip.center.x + clip.radius + inset;
    }

    let mut text_right = rect.x1 - inset;
    if deco.contains(Decorations::BADGE) {
        let br = config.badge_radius;
        let c = Point::new(rect.x1 - inset - br, rect.y0 + inset + br);
        list.push(DrawCmd::Fill {
            shape: Primitive::Circle(Circle::new(c, br)),
            color: p.badge_fill,
        });
        list.push(DrawCmd::Text {
            text: Cow::Owned(node.record.generation.to_string()),
            origin: Point::new(c.x, c.y + br * 0.35),
            size: br,
            face: faces.bold.clone(),
            color: p.badge_text,
            align: TextAlign::Center,
            max_width: None,
        });
        text_right -= 2.0 * br;
    }

    let size = config.name_font_size;
    list.push(DrawCmd::Text {
        text: Cow::Owned(node.record.name.clone()),
        origin: Point::new(text_x, rect.center().y + size * 0.35),
        size,
        face: faces.bold.clone(),
        color: p.text,
        align: TextAlign::Start,
        max_width: Some((text_right - text_x).max(0.0)),
    });
    deco
}

/// Pill shape for a node's display box.
pub fn pill_shape(rect: Rect, height: f64) -> RoundedRect {
    let h = height.min(rect.height()).max(0.0);
    let c = rect.center();
    let r = Rect::new(rect.x0, c.y - h * 0.5, rect.x1, c.y + h * 0.5);
    RoundedRect::from_rect(r, h * 0.5)
}

/// Draw a compact pill with the first name.
pub fn draw_pill(
    list: &mut DisplayList,
    node: &NodeView<'_>,
    config: &RenderConfig,
    faces: &TypefaceSet,
) {
    let p = &config.palette;
    let pill = pill_shape(node.rect, config.pill_height);
    list.push(DrawCmd::Fill {
        shape: Primitive::RoundedRect(pill),
        color: p.pill_fill,
    });
    list.push(DrawCmd::Stroke {
        shape: Primitive::RoundedRect(pill),
        color: if node.flags.contains(NodeFlags::ROOT) {
            p.root_accent
        } else {
            p.pill_border
        },
        width: config.card_border_width,
    });
    let rect = pill.rect();
    let size = config.pill_font_size;
    list.push(DrawCmd::Text {
        text: Cow::Owned(node.record.first_name().to_owned()),
        origin: Point::new(rect.center().x, rect.center().y + size * 0.35),
        size,
        face: faces.bold.clone(),
        color: p.text,
        align: TextAlign::Center,
        max_width: Some((rect.width() - rect.height()).max(0.0)),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LayoutIndices {
        LayoutIndices::build(vec![
            NodeRecord::new(1, 0.0, 0.0, None, 1, "Ada Lovelace").with_photo("ada.jpg"),
            NodeRecord::new(2, 0.0, 200.0, Some(1), 2, "Byron King"),
            NodeRecord::new(3, 0.0, 400.0, Some(2), 3, "Anne Noel").with_photo("anne.jpg"),
        ])
        .0
    }

    #[test]
    fn decorations_follow_role() {
        let idx = sample();
        let root = NodeView::new(&idx, NodeId(1)).unwrap();
        assert_eq!(
            root.decorations(),
            Decorations::ROOT_RING | Decorations::PHOTO | Decorations::BADGE
        );
        let second = NodeView::new(&idx, NodeId(2)).unwrap();
        assert_eq!(second.decorations(), Decorations::BRANCH_BAR | Decorations::BADGE);
        let leaf = NodeView::new(&idx, NodeId(3)).unwrap();
        assert_eq!(leaf.decorations(), Decorations::PHOTO | Decorations::BADGE);
    }

    #[test]
    fn card_requests_photo_at_bucket() {
        let idx = sample();
        let view = NodeView::new(&idx, NodeId(3)).unwrap();
        let mut list = DisplayList::default();
        draw_card(&mut list, &view, Some(128), &RenderConfig::default(), &TypefaceSet::default());
        let reqs: Vec<_> = list.image_requests().collect();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].bucket, 128);
        assert_eq!(reqs[0].url, "anne.jpg");
        assert!(view.rect.contains(reqs[0].clip.center));
        assert!(list.texts().any(|t| t == "Anne Noel"));
        assert!(list.texts().any(|t| t == "3"));
    }

    #[test]
    fn card_without_bucket_keeps_placeholder() {
        let idx = sample();
        let view = NodeView::new(&idx, NodeId(1)).unwrap();
        let mut list = DisplayList::default();
        draw_card(&mut list, &view, None, &RenderConfig::default(), &TypefaceSet::default());
        assert_eq!(list.image_requests().count(), 0);
    }

    #[test]
    fn pill_shows_first_name_only() {
        let idx = sample();
        let view = NodeView::new(&idx, NodeId(2)).unwrap();
        let mut list = DisplayList::default();
        draw_pill(&mut list, &view, &RenderConfig::default(), &TypefaceSet::default());
        assert_eq!(list.texts().collect::<Vec<_>>(), ["Byron"]);
        assert_eq!(list.image_requests().count(), 0);
        let pill = pill_shape(view.rect, 48.0);
        assert_eq!(pill.rect().height(), 48.0);
        assert_eq!(pill.rect().center(), view.rect.center());
    }
}
