// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend-agnostic draw commands.
//!
//! A [`DisplayList`] has two layers. The world layer is in layout space and is
//! drawn under [`DisplayList::transform`]; the screen layer is in device
//! independent pixels and is drawn untransformed on top.

use std::borrow::Cow;

use arbor_layout::NodeId;
use kurbo::{Affine, BezPath, Circle, Point, Rect, RoundedRect, Shape};
use peniko::Color;

use crate::fonts::Typeface;

/// A closed shape to fill or stroke.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Rectangle with rounded corners.
    RoundedRect(RoundedRect),
    /// Circle.
    Circle(Circle),
}

impl Primitive {
    /// Bounding box.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(r) => *r,
            Self::RoundedRect(r) => r.rect(),
            Self::Circle(c) => c.bounding_box(),
        }
    }
}

/// Horizontal text anchoring relative to the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Origin is the left end of the baseline.
    #[default]
    Start,
    /// Origin is the middle of the baseline.
    Center,
}

/// A request to draw a node's photo inside a circular mask.
///
/// The host decodes `url` at `bucket` pixels and draws it clipped to `clip`.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRequest {
    /// Node the photo belongs to.
    pub node: NodeId,
    /// Photo reference from the node record.
    pub url: String,
    /// Circular mask in layout space.
    pub clip: Circle,
    /// Edge length, in device pixels, of the resolution to decode.
    pub bucket: u32,
}

/// One draw command.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Fill a shape.
    Fill {
        /// Shape to fill.
        shape: Primitive,
        /// Fill color.
        color: Color,
    },
    /// Stroke a shape outline.
    Stroke {
        /// Shape to outline.
        shape: Primitive,
        /// Stroke color.
        color: Color,
        /// Stroke width in the layer's units.
        width: f64,
    },
    /// Stroke an open path.
    Path {
        /// Path to stroke.
        path: BezPath,
        /// Stroke color.
        color: Color,
        /// Stroke width in the layer's units.
        width: f64,
    },
    /// Stroke an open path under a Gaussian blur.
    Glow {
        /// Path to stroke.
        path: BezPath,
        /// Stroke color, alpha included.
        color: Color,
        /// Stroke width in the layer's units.
        width: f64,
        /// Blur standard deviation in the layer's units; 0 draws a crisp line.
        blur: f64,
    },
    /// Draw a photo.
    Image(ImageRequest),
    /// Draw a single line of text, shaped by the host.
    Text {
        /// Text to draw.
        text: Cow<'static, str>,
        /// Baseline anchor.
        origin: Point,
        /// Font size in the layer's units.
        size: f64,
        /// Face to shape with.
        face: Typeface,
        /// Text color.
        color: Color,
        /// Anchoring of `origin`.
        align: TextAlign,
        /// Width the host may ellipsize to; unbounded when `None`.
        max_width: Option<f64>,
    },
}

/// Draw commands for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    /// Layout-space to screen transform for the world layer.
    pub transform: Affine,
    world: Vec<DrawCmd>,
    screen: Vec<DrawCmd>,
}

impl DisplayList {
    /// An empty list drawn under `transform`.
    pub fn new(transform: Affine) -> Self {
        Self {
            transform,
            world: Vec::new(),
            screen: Vec::new(),
        }
    }

    /// Empty both layers, keeping their allocations.
    pub fn reset(&mut self, transform: Affine) {
        self.transform = transform;
        self.world.clear();
        self.screen.clear();
    }

    /// Append a command to the world layer.
    pub fn push(&mut self, cmd: DrawCmd) {
        self.world.push(cmd);
    }

    /// Append a command to the screen layer.
    pub fn push_screen(&mut self, cmd: DrawCmd) {
        self.screen.push(cmd);
    }

    /// World-layer commands in drawing order.
    pub fn world(&self) -> &[DrawCmd] {
        &self.world
    }

    /// Screen-layer commands in drawing order.
    pub fn screen(&self) -> &[DrawCmd] {
        &self.screen
    }

    /// Total number of commands.
    pub fn len(&self) -> usize {
        self.world.len() + self.screen.len()
    }

    /// True if neither layer has commands.
    pub fn is_empty(&self) -> bool {
        self.world.is_empty() && self.screen.is_empty()
    }

    /// Image requests in the world layer.
    pub fn image_requests(&self) -> impl Iterator<Item = &ImageRequest> + '_ {
        self.world.iter().filter_map(|c| match c {
            DrawCmd::Image(req) => Some(req),
            _ => None,
        })
    }

    /// Text runs in the world layer.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.world.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_ref()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_transform_fresh() {
        let mut list = DisplayList::new(Affine::scale(2.0));
        list.push(DrawCmd::Fill {
            shape: Primitive::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)),
            color: Color::WHITE,
        });
        list.push_screen(DrawCmd::Fill {
            shape: Primitive::Circle(Circle::new((0.0, 0.0), 1.0)),
            color: Color::BLACK,
        });
        assert_eq!(list.len(), 2);
        list.reset(Affine::IDENTITY);
        assert!(list.is_empty());
        assert_eq!(list.transform, Affine::IDENTITY);
    }

    #[test]
    fn primitive_bounds() {
        let c = Primitive::Circle(Circle::new((10.0, 10.0), 5.0));
        assert_eq!(c.bounds(), Rect::new(5.0, 5.0, 15.0, 15.0));
        let r = Primitive::RoundedRect(RoundedRect::new(0.0, 0.0, 4.0, 2.0, 1.0));
        assert_eq!(r.bounds(), Rect::new(0.0, 0.0, 4.0, 2.0));
    }
}
