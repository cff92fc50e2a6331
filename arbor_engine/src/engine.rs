// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine facade the host drives.

use std::fmt;
use std::sync::Arc;

use arbor_layout::{NodeId, NodeRecord};
use arbor_lod::{Tier, TierSelector};
use arbor_render::{
    AncestryHighlighter, DebugOverlay, DisplayList, FrameInput, FrameStats, TierDispatcher,
    TypefaceRegistry,
};
use arbor_view::{CameraController, GestureInput, GestureOutcome, Stage};
use kurbo::{Point, Rect, Size};
use log::{debug, info, trace};

use crate::TARGET;
use crate::config::EngineConfig;
use crate::events::EngineEvent;
use crate::scene::{Scene, VisibleSet, query_rect};
use crate::snapshot::{CommitReason, RenderThrottle, SnapshotSlot, TransformSnapshot};

/// Output of one committed frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Snapshot the frame was derived from.
    pub snapshot: TransformSnapshot,
    /// What triggered the commit.
    pub reason: CommitReason,
    /// Draw commands.
    pub list: DisplayList,
    /// Counters.
    pub stats: FrameStats,
    /// Ids handed to the dispatcher.
    pub visible: Vec<NodeId>,
    /// Overlay values, when enabled.
    pub overlay: Option<DebugOverlay>,
}

type SelectionHandler = Box<dyn FnMut(NodeId)>;

/// Scene, camera, detail selection, and frame assembly behind one API.
///
/// Feed it node lists, viewport changes, and gesture samples, then call
/// [`Engine::tick`] once per display frame. The camera moves on every sample;
/// derived state (visible set, tier, draw list) is recomputed only when the
/// view has changed enough, and the resulting [`Frame`] is returned then.
pub struct Engine {
    config: EngineConfig,
    scene: Scene,
    camera: CameraController,
    tiers: TierSelector,
    dispatcher: TierDispatcher,
    highlighter: AncestryHighlighter,
    slot: Arc<SnapshotSlot>,
    throttle: RenderThrottle,
    pixel_density: f64,
    data_generation: u64,
    force_commit: bool,
    viewport_known: bool,
    center_pending: bool,
    frame: Option<Frame>,
    events: Vec<EngineEvent>,
    on_select: Option<SelectionHandler>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("nodes", &self.scene.indices().len())
            .field("generation", &self.data_generation)
            .field("stage", &self.camera.stage())
            .field("state", &self.camera.state())
            .field("tier", &self.tiers.current())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// An engine with no nodes.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scene: Scene::empty(config.grid.cell_size),
            camera: CameraController::new(config.camera),
            tiers: TierSelector::new(config.lod),
            dispatcher: TierDispatcher::new(config.render.clone(), config.image.clone()),
            highlighter: AncestryHighlighter::new(config.highlight.clone()),
            slot: Arc::new(SnapshotSlot::new()),
            throttle: RenderThrottle::new(config.throttle.clone()),
            pixel_density: 1.0,
            data_generation: 0,
            force_commit: true,
            viewport_known: false,
            center_pending: false,
            frame: None,
            events: Vec::new(),
            on_select: None,
            config,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the node list.
    ///
    /// Camera, tier, and photo bucket state carry over; buckets of vanished
    /// nodes are pruned. The first non-empty list centers the root at scale 1,
    /// or at the first [`Engine::set_viewport`] if no viewport is known yet.
    pub fn load_nodes(&mut self, records: Vec<NodeRecord>) {
        let was_empty = self.scene.indices().is_empty();
        self.data_generation += 1;
        self.scene = Scene::build(records, self.config.grid.cell_size, self.data_generation);
        let indices = self.scene.indices();
        self.camera
            .set_tree_bounds(self.scene.tree_bounds().unwrap_or(Rect::ZERO));
        self.dispatcher.prune_images(indices);
        self.highlighter.refresh(indices);
        let has_root = indices.root().is_some();
        self.force_commit = true;
        info!(
            target: TARGET,
            "loaded {} nodes (generation {})",
            indices.len(),
            self.data_generation
        );
        if was_empty && has_root {
            if self.viewport_known {
                self.center_root();
            } else {
                self.center_pending = true;
            }
        }
    }

    /// Set the viewport size in screen pixels and the device pixel density.
    pub fn set_viewport(&mut self, size: Size, pixel_density: f64) {
        self.camera.set_viewport(size);
        self.pixel_density = if pixel_density.is_finite() && pixel_density > 0.0 {
            pixel_density
        } else {
            1.0
        };
        self.viewport_known = true;
        if self.center_pending {
            self.center_root();
        }
    }

    fn center_root(&mut self) {
        self.center_pending = false;
        let indices = self.scene.indices();
        if let Some(root) = indices.root().and_then(|r| indices.display_rect(r)) {
            let stage = arbor_view::center_on_stage(root.center(), 1.0, self.camera.viewport());
            self.camera.set_stage(stage);
        }
    }

    /// Register the callback invoked with the id of every tapped node.
    pub fn set_selection_handler(&mut self, handler: Box<dyn FnMut(NodeId)>) {
        self.on_select = Some(handler);
    }

    /// Remove the selection callback.
    pub fn clear_selection_handler(&mut self) {
        self.on_select = None;
    }

    /// Take the events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed one gesture sample.
    ///
    /// A tap on a node selects it and highlights its ancestry; a tap on empty
    /// space clears the highlight. In the aggregate tier a tap on a hero chip
    /// fits the camera to that hero's subtree instead.
    pub fn handle_gesture(&mut self, input: GestureInput, now_ms: u64) -> GestureOutcome {
        let outcome = self.camera.handle(input, now_ms);
        match outcome {
            GestureOutcome::Tap { world, .. } => self.on_tap(world, now_ms),
            GestureOutcome::LongPress { world, .. } => {
                if let Some(id) = self.scene.node_at(world) {
                    self.events.push(EngineEvent::LongPressed(id));
                }
            }
            GestureOutcome::Ignored | GestureOutcome::Moved | GestureOutcome::Released => {}
        }
        outcome
    }

    fn on_tap(&mut self, world: Point, now_ms: u64) {
        if self.tiers.current() == Tier::Aggregate {
            if let Some(hero) = self.dispatcher.hero_chip_at(world) {
                if let Some(bounds) = self.scene.indices().subtree_bounds(hero) {
                    self.camera.fit_rect(bounds, now_ms);
                }
                debug!(target: TARGET, "hero {hero} focused");
                self.events.push(EngineEvent::HeroFocused(hero));
                self.force_commit = true;
            }
            return;
        }
        match self.scene.node_at(world) {
            Some(id) => {
                self.highlighter
                    .highlight(self.scene.indices(), id, now_ms);
                self.events.push(EngineEvent::Selected(id));
                if let Some(handler) = self.on_select.as_mut() {
                    handler(id);
                }
            }
            None => self.highlighter.clear(now_ms),
        }
        self.force_commit = true;
    }

    /// Animate to `id` at a readable scale and briefly highlight its ancestry.
    ///
    /// Returns the landing stage, or `None` for unknown ids.
    pub fn navigate_to(&mut self, id: NodeId, now_ms: u64) -> Option<Stage> {
        let rect = self.scene.indices().display_rect(id)?;
        let scale = self.camera.stage().safe_scale().max(1.0);
        let stage = self.camera.center_on(rect.center(), scale, now_ms);
        self.highlighter
            .highlight_transient(self.scene.indices(), id, now_ms);
        self.events
            .push(EngineEvent::NavigationStarted { target: id, stage });
        self.force_commit = true;
        Some(stage)
    }

    /// Animate back to the root at scale 1.
    pub fn recenter_on_root(&mut self, now_ms: u64) -> Option<Stage> {
        let indices = self.scene.indices();
        let rect = indices.root().and_then(|r| indices.display_rect(r))?;
        Some(self.camera.center_on(rect.center(), 1.0, now_ms))
    }

    /// Animate so `id` is centered, keeping the current scale.
    pub fn recenter_on(&mut self, id: NodeId, now_ms: u64) -> Option<Stage> {
        let rect = self.scene.indices().display_rect(id)?;
        let scale = self.camera.stage().scale;
        Some(self.camera.center_on(rect.center(), scale, now_ms))
    }

    /// Highlight the ancestry of `id` until cleared.
    pub fn highlight_ancestry(&mut self, id: NodeId, now_ms: u64) -> &[NodeId] {
        self.force_commit = true;
        self.highlighter.highlight(self.scene.indices(), id, now_ms)
    }

    /// Fade out the ancestry highlight.
    pub fn clear_highlight(&mut self, now_ms: u64) {
        self.highlighter.clear(now_ms);
        self.force_commit = true;
    }

    /// Current camera stage.
    pub fn camera(&self) -> Stage {
        self.camera.stage()
    }

    /// The camera controller.
    pub fn camera_controller(&self) -> &CameraController {
        &self.camera
    }

    /// Current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Last committed tier.
    pub fn tier(&self) -> Tier {
        self.tiers.current()
    }

    /// Ancestry highlight state.
    pub fn highlighter(&self) -> &AncestryHighlighter {
        &self.highlighter
    }

    /// The slot transform snapshots are published into.
    pub fn snapshot_slot(&self) -> Arc<SnapshotSlot> {
        Arc::clone(&self.slot)
    }

    /// The last committed frame.
    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    /// Advance the camera and timers, publish the transform, and commit a
    /// frame if the throttle passes. Returns the new frame when one is committed.
    pub fn tick(&mut self, now_ms: u64) -> Option<&Frame> {
        self.camera.tick(now_ms);
        let fading = self.highlighter.tick(now_ms);
        self.slot.publish(
            self.camera.stage(),
            self.camera.viewport(),
            self.pixel_density,
            self.data_generation,
            now_ms,
        );
        let snap = self.slot.latest()?;

        let reason = self.throttle.check(&snap, now_ms).or_else(|| {
            let waiting = fading || self.dispatcher.images().has_pending();
            (self.force_commit || waiting).then_some(CommitReason::Forced)
        })?;
        self.force_commit = false;
        self.commit(snap, reason, now_ms);
        self.frame.as_ref()
    }

    fn commit(&mut self, snap: TransformSnapshot, reason: CommitReason, now_ms: u64) {
        let tier = self.tiers.update(snap.stage.scale, snap.pixel_density);
        let world = query_rect(snap.stage, snap.viewport, self.config.grid.margin_px);
        let VisibleSet { ids, truncated } = self.scene.visible(world, self.config.grid.max_visible);

        let mut list = self.frame.take().map(|f| f.list).unwrap_or_default();
        let input = FrameInput {
            indices: self.scene.indices(),
            visible: &ids,
            edges: Some(self.scene.edges()),
            truncated_nodes: truncated,
            stage: snap.stage,
            viewport: snap.viewport,
            pixel_density: snap.pixel_density,
            tier,
            now_ms: snap.taken_at_ms,
        };
        let stats = self
            .dispatcher
            .dispatch(&input, Some(&self.highlighter), &mut list);

        let overlay = self.config.debug_overlay.then(|| {
            let overlay = DebugOverlay::new(self.scene.indices().len(), snap.stage, &stats);
            overlay.draw(
                &mut list,
                self.dispatcher.config(),
                TypefaceRegistry::global().typefaces(),
            );
            overlay
        });
        trace!(
            target: TARGET,
            "frame v{}: {} visible{}, {} edge segments{}",
            snap.version,
            ids.len(),
            if truncated { " (capped)" } else { "" },
            stats.edge_segments,
            if stats.truncated_edges { " (capped)" } else { "" }
        );
        self.throttle.commit(snap, reason, now_ms);
        self.frame = Some(Frame {
            snapshot: snap,
            reason,
            list,
            stats,
            visible: ids,
            overlay,
        });
    }
}
