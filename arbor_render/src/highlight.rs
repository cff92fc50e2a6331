// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestry path glow.
//!
//! The path from the root to a node is drawn as layered glowing elbows over
//! the regular edges. Links are grouped by generation gap so skipped
//! generations read differently, and every layer of every group follows one
//! shared [`Fade`], so the path appears and disappears as a unit.

use arbor_layout::{AncestryLink, AncestryPath, LayoutIndices, NodeId};
use kurbo::BezPath;
use log::debug;

use crate::config::{HighlightConfig, Palette};
use crate::display::{DisplayList, DrawCmd};

const TARGET: &str = "arbor::render";

/// Linear opacity driver between 0 and 1.
///
/// Reversing mid-way continues from the current opacity, so a quick
/// show-hide-show never jumps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fade {
    fade_in_ms: u64,
    fade_out_ms: u64,
    from: f64,
    shown: bool,
    start_ms: u64,
}

impl Fade {
    /// A hidden fade.
    pub fn new(fade_in_ms: u64, fade_out_ms: u64) -> Self {
        Self {
            fade_in_ms,
            fade_out_ms,
            from: 0.0,
            shown: false,
            start_ms: 0,
        }
    }

    /// Start fading in at `now_ms`.
    pub fn show(&mut self, now_ms: u64) {
        self.retarget(true, now_ms);
    }

    /// Start fading out at `now_ms`.
    pub fn hide(&mut self, now_ms: u64) {
        self.retarget(false, now_ms);
    }

    /// Whether the fade is heading to fully visible.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    fn retarget(&mut self, shown: bool, now_ms: u64) {
        if self.shown == shown {
            return;
        }
        self.from = self.opacity(now_ms);
        self.shown = shown;
        self.start_ms = now_ms;
    }

    /// Opacity at `now_ms`.
    pub fn opacity(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms) as f64;
        if self.shown {
            if self.fade_in_ms == 0 {
                return 1.0;
            }
            (self.from + elapsed / self.fade_in_ms as f64).min(1.0)
        } else {
            if self.fade_out_ms == 0 {
                return 0.0;
            }
            (self.from - elapsed / self.fade_out_ms as f64).max(0.0)
        }
    }

    /// Whether the opacity is still changing at `now_ms`.
    pub fn is_animating(&self, now_ms: u64) -> bool {
        let o = self.opacity(now_ms);
        if self.shown { o < 1.0 } else { o > 0.0 }
    }
}

/// Color group of an ancestry link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GapGroup {
    /// Parent and child are consecutive generations.
    Direct,
    /// One generation is skipped.
    Skip,
    /// Two or more generations are skipped.
    Distant,
}

impl GapGroup {
    /// Group of a generation gap.
    pub fn of(gap: u32) -> Self {
        match gap {
            0 | 1 => Self::Direct,
            2 => Self::Skip,
            _ => Self::Distant,
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Direct => 0,
            Self::Skip => 1,
            Self::Distant => 2,
        }
    }
}

/// Keeps the highlighted ancestry path and its fade.
#[derive(Clone, Debug)]
pub struct AncestryHighlighter {
    config: HighlightConfig,
    target: Option<NodeId>,
    path: AncestryPath,
    links: Vec<AncestryLink>,
    fade: Fade,
    hide_at_ms: Option<u64>,
}

impl Default for AncestryHighlighter {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

impl AncestryHighlighter {
    /// A highlighter showing nothing.
    pub fn new(config: HighlightConfig) -> Self {
        let fade = Fade::new(config.fade_in_ms, config.fade_out_ms);
        Self {
            config,
            target: None,
            path: AncestryPath::new(),
            links: Vec::new(),
            fade,
            hide_at_ms: None,
        }
    }

    /// Tuning in effect.
    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Node whose ancestry is highlighted, if any.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Highlighted ids, root first.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Highlight the ancestry of `id` until cleared.
    pub fn highlight(&mut self, indices: &LayoutIndices, id: NodeId, now_ms: u64) -> &[NodeId] {
        self.set_target(indices, id, now_ms);
        self.hide_at_ms = None;
        &self.path
    }

    /// Highlight the ancestry of `id`, fading out on its own after the transient window.
    pub fn highlight_transient(
        &mut self,
        indices: &LayoutIndices,
        id: NodeId,
        now_ms: u64,
    ) -> &[NodeId] {
        self.set_target(indices, id, now_ms);
        self.hide_at_ms = Some(now_ms.saturating_add(self.config.transient_ms));
        &self.path
    }

    fn set_target(&mut self, indices: &LayoutIndices, id: NodeId, now_ms: u64) {
        self.path = indices.ancestry_path(id);
        self.links = indices.ancestry_links(&self.path);
        if self.path.is_empty() {
            debug!(target: TARGET, "no ancestry for {id}");
            self.target = None;
            self.fade.hide(now_ms);
            return;
        }
        self.target = Some(id);
        self.fade.show(now_ms);
    }

    /// Start fading out.
    pub fn clear(&mut self, now_ms: u64) {
        self.hide_at_ms = None;
        self.fade.hide(now_ms);
    }

    /// Recompute the path against new indices. A target that vanished is dropped at once.
    pub fn refresh(&mut self, indices: &LayoutIndices) {
        let Some(id) = self.target else {
            return;
        };
        self.path = indices.ancestry_path(id);
        self.links = indices.ancestry_links(&self.path);
        if self.path.is_empty() {
            self.target = None;
            self.hide_at_ms = None;
            self.fade = Fade::new(self.config.fade_in_ms, self.config.fade_out_ms);
        }
    }

    /// Advance timers. Returns true while the glow is changing.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.hide_at_ms.is_some_and(|t| now_ms >= t) {
            self.hide_at_ms = None;
            self.fade.hide(now_ms);
        }
        if !self.fade.is_shown() && self.fade.opacity(now_ms) <= 0.0 {
            self.target = None;
        }
        self.fade.is_animating(now_ms)
    }

    /// Shared opacity at `now_ms`.
    pub fn opacity(&self, now_ms: u64) -> f64 {
        if self.links.is_empty() {
            0.0
        } else {
            self.fade.opacity(now_ms)
        }
    }

    /// Draw the glow layers. Returns the number of commands emitted.
    pub fn draw(
        &self,
        indices: &LayoutIndices,
        palette: &Palette,
        now_ms: u64,
        list: &mut DisplayList,
    ) -> usize {
        let opacity = self.opacity(now_ms);
        if opacity <= 0.0 {
            return 0;
        }
        let mut groups = [BezPath::new(), BezPath::new(), BezPath::new()];
        for link in &self.links {
            let Some(elbow) = indices.elbow(link.parent, link.child) else {
                continue;
            };
            let path = &mut groups[GapGroup::of(link.generation_gap).slot()];
            for seg in elbow {
                path.move_to(seg.p0);
                path.line_to(seg.p1);
            }
        }

        let layers = self.config.layers.max(1);
        let span = f64::from(layers.saturating_sub(1).max(1));
        let mut emitted = 0;
        for (slot, path) in groups.iter().enumerate() {
            if path.elements().is_empty() {
                continue;
            }
            for i in 0..layers {
                // 0 is the outer halo, 1 the crisp core.
                let f = f64::from(i) / span;
                let alpha = opacity * (0.25 + 0.75 * f);
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "opacity in [0, 1] fits f32"
                )]
                let color = palette.ancestry[slot].multiply_alpha(alpha as f32);
                list.push(DrawCmd::Glow {
                    path: path.clone(),
                    color,
                    width: self.config.core_width * (1.0 + 3.0 * (1.0 - f)),
                    blur: self.config.max_blur * (1.0 - f),
                });
                emitted += 1;
            }
        }
        emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_layout::NodeRecord;

    fn chain() -> LayoutIndices {
        // 1 -> 2 -> 4 (skips generation 3) -> 5 (skips two).
        LayoutIndices::build(vec![
            NodeRecord::new(1, 0.0, 0.0, None, 1, "A"),
            NodeRecord::new(2, 0.0, 300.0, Some(1), 2, "B"),
            NodeRecord::new(3, 400.0, 300.0, Some(1), 2, "C"),
            NodeRecord::new(4, 0.0, 600.0, Some(2), 4, "D"),
            NodeRecord::new(5, 0.0, 900.0, Some(4), 7, "E"),
        ])
        .0
    }

    #[test]
    fn fade_reverses_from_current_opacity() {
        let mut f = Fade::new(200, 200);
        assert_eq!(f.opacity(0), 0.0);
        f.show(0);
        assert!((f.opacity(100) - 0.5).abs() < 1e-12);
        f.hide(100);
        assert!((f.opacity(150) - 0.25).abs() < 1e-12);
        assert_eq!(f.opacity(300), 0.0);
        assert!(!f.is_animating(300));
    }

    #[test]
    fn gap_groups() {
        assert_eq!(GapGroup::of(1), GapGroup::Direct);
        assert_eq!(GapGroup::of(2), GapGroup::Skip);
        assert_eq!(GapGroup::of(3), GapGroup::Distant);
        assert_eq!(GapGroup::of(9), GapGroup::Distant);
    }

    #[test]
    fn layers_share_one_opacity_and_sharpen_inward() {
        let idx = chain();
        let mut h = AncestryHighlighter::default();
        assert_eq!(h.highlight(&idx, NodeId(5), 0), &[NodeId(1), NodeId(2), NodeId(4), NodeId(5)]);

        let mut list = DisplayList::default();
        // Three groups, four layers each.
        assert_eq!(h.draw(&idx, &Palette::default(), 220, &mut list), 12);
        let blurs: Vec<f64> = list
            .world()
            .iter()
            .take(4)
            .map(|c| match c {
                DrawCmd::Glow { blur, .. } => *blur,
                _ => f64::NAN,
            })
            .collect();
        assert!(blurs.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(blurs[3], 0.0);
    }

    #[test]
    fn transient_highlight_fades_on_its_own() {
        let idx = chain();
        let mut h = AncestryHighlighter::default();
        h.highlight_transient(&idx, NodeId(4), 1000);
        assert!(h.tick(1100));
        assert_eq!(h.opacity(1220), 1.0);
        assert!(!h.tick(3000));
        // The window closes at 3500 and the fade-out takes 220 ms.
        h.tick(3500);
        assert!(h.opacity(3600) < 1.0);
        assert!(!h.tick(3720));
        assert_eq!(h.target(), None);
        let mut list = DisplayList::default();
        assert_eq!(h.draw(&idx, &Palette::default(), 3720, &mut list), 0);
    }

    #[test]
    fn refresh_drops_vanished_target() {
        let idx = chain();
        let mut h = AncestryHighlighter::default();
        h.highlight(&idx, NodeId(5), 0);
        let smaller = LayoutIndices::build(vec![NodeRecord::new(1, 0.0, 0.0, None, 1, "A")]).0;
        h.refresh(&smaller);
        assert_eq!(h.target(), None);
        assert_eq!(h.opacity(500), 0.0);
    }
}
