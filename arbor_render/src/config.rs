// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render and highlight tuning.

use peniko::Color;

/// Colors used by every drawing routine.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Card body.
    pub card_fill: Color,
    /// Card outline.
    pub card_border: Color,
    /// Outline and ring of the root card.
    pub root_accent: Color,
    /// Top bar of second-generation cards with children.
    pub branch_accent: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text.
    pub text_muted: Color,
    /// Generation badge body.
    pub badge_fill: Color,
    /// Generation badge text.
    pub badge_text: Color,
    /// Pill body.
    pub pill_fill: Color,
    /// Pill outline.
    pub pill_border: Color,
    /// Photo circle behind the image, visible while it loads.
    pub photo_placeholder: Color,
    /// Elbow edges.
    pub edge: Color,
    /// Hero chip body.
    pub chip_fill: Color,
    /// Hero chip text.
    pub chip_text: Color,
    /// Debug overlay panel.
    pub overlay_fill: Color,
    /// Debug overlay text.
    pub overlay_text: Color,
    /// Ancestry glow for generation gaps of 1, 2, and 3 or more.
    pub ancestry: [Color; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            card_fill: Color::WHITE,
            card_border: Color::from_rgb8(0xD9, 0xD2, 0xC5),
            root_accent: Color::from_rgb8(0xB8, 0x86, 0x0B),
            branch_accent: Color::from_rgb8(0x5B, 0x8C, 0x5A),
            text: Color::from_rgb8(0x2B, 0x2B, 0x2B),
            text_muted: Color::from_rgb8(0x6B, 0x6B, 0x6B),
            badge_fill: Color::from_rgb8(0xEF, 0xE7, 0xD6),
            badge_text: Color::from_rgb8(0x5A, 0x4A, 0x2A),
            pill_fill: Color::WHITE,
            pill_border: Color::from_rgb8(0xD9, 0xD2, 0xC5),
            photo_placeholder: Color::from_rgb8(0xE6, 0xE0, 0xD4),
            edge: Color::from_rgb8(0xB7, 0xAE, 0x9F),
            chip_fill: Color::from_rgb8(0x3E, 0x5C, 0x76),
            chip_text: Color::WHITE,
            overlay_fill: Color::from_rgba8(0, 0, 0, 0x99),
            overlay_text: Color::WHITE,
            ancestry: [
                Color::from_rgb8(0xF2, 0xA9, 0x00),
                Color::from_rgb8(0xE4, 0x57, 0x2E),
                Color::from_rgb8(0x8E, 0x44, 0xAD),
            ],
        }
    }
}

/// Geometry and limits for the tier dispatcher.
///
/// Lengths are layout units unless the name ends in `_px`, in which case they
/// are screen pixels and divided by the camera scale when drawn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Colors.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub palette: Palette,
    /// Card corner radius.
    pub card_corner_radius: f64,
    /// Card outline width.
    pub card_border_width: f64,
    /// Root card outline width.
    pub root_border_width: f64,
    /// Gap between the card edge and the photo circle.
    pub photo_inset: f64,
    /// Card name size.
    pub name_font_size: f64,
    /// Generation badge radius.
    pub badge_radius: f64,
    /// Height of the compact pill.
    pub pill_height: f64,
    /// Pill first-name size.
    pub pill_font_size: f64,
    /// Elbow edge width.
    pub edge_width: f64,
    /// Segments per path object before it is flushed.
    pub edge_flush_segments: usize,
    /// Edge segments drawn per frame at most.
    pub max_edge_segments: usize,
    /// Hero chip radius on screen.
    pub chip_radius_px: f64,
    /// Hero chip text size on screen.
    pub chip_font_px: f64,
    /// Debug overlay text size.
    pub overlay_font_px: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            card_corner_radius: 14.0,
            card_border_width: 1.5,
            root_border_width: 3.0,
            photo_inset: 10.0,
            name_font_size: 18.0,
            badge_radius: 13.0,
            pill_height: 48.0,
            pill_font_size: 28.0,
            edge_width: 2.0,
            edge_flush_segments: 50,
            max_edge_segments: 1500,
            chip_radius_px: 34.0,
            chip_font_px: 13.0,
            overlay_font_px: 12.0,
        }
    }
}

/// Timing and layering of the ancestry glow.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HighlightConfig {
    /// Fade-in duration.
    pub fade_in_ms: u64,
    /// Fade-out duration.
    pub fade_out_ms: u64,
    /// How long a transient highlight stays before fading out.
    pub transient_ms: u64,
    /// Stroke passes per group, from widest and blurriest to crisp.
    pub layers: u8,
    /// Width of the innermost pass.
    pub core_width: f64,
    /// Blur of the outermost pass.
    pub max_blur: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 220,
            fade_out_ms: 220,
            transient_ms: 2500,
            layers: 4,
            core_width: 3.0,
            max_blur: 12.0,
        }
    }
}
