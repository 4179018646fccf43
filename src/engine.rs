// SelectionEngine: the single owned gesture object shared by the pixel overlay and the
// logical committer. Pointer events go in, host effects and commit results come out.

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::types::Config;
use crate::grid::coords::GridMetrics;
use crate::grid::{GridPoint, GridSize};
use crate::input::mouse::{DragState, PixelDragState};
use crate::input::promotion::PromotionTracker;
use crate::input::selection::{
    commit, resolve_rect, CommitOutcome, GestureSummary, ItemLookup, SelectionRect,
};
use crate::input::{Modifiers, Point, PointerEvent};
use crate::scroll::{AutoScroller, FrameAction, ScrollViewport};

/// Grid shape and zoom, supplied by the host on every render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub size: GridSize,
    pub cell_size: f32,
}

impl GridGeometry {
    pub fn new(rows: usize, cols: usize, cell_size: f32) -> Self {
        Self {
            size: GridSize::new(rows, cols),
            cell_size,
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(0, 0, 40.0)
    }
}

/// Effects the host applies after handing an event to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEffect {
    /// Listen for pointer move/up at window scope until `ReleasePointer`.
    CapturePointer,
    /// Remove the window-scope pointer listeners.
    ReleasePointer,
    /// A plain press was promoted; switch the grid into selection mode.
    EnterSelectionMode,
    /// Schedule an animation frame and call `on_frame` from it.
    RequestFrame,
    /// The drag box or rectangle changed.
    Redraw,
}

/// A finished gesture and what it does to the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<I: Eq + Hash> {
    pub summary: GestureSummary,
    pub outcome: CommitOutcome<I>,
}

impl<I: Eq + Hash + Clone> Committed<I> {
    /// Next selection given the prior one, or `None` when the gesture was a plain click.
    pub fn next_selection(&self, prior: &HashSet<I>) -> Option<HashSet<I>> {
        match &self.outcome {
            CommitOutcome::Click => None,
            CommitOutcome::Update(update) => Some(update.apply(prior)),
        }
    }
}

/// Result of a pointer release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerUp<I: Eq + Hash> {
    pub effects: Vec<EngineEffect>,
    /// `None` when no selection gesture was in progress.
    pub commit: Option<Committed<I>>,
}

/// Interactive rectangular selection over a zoomable grid.
#[derive(Debug)]
pub struct SelectionEngine {
    config: Config,
    grid: GridGeometry,
    drag: DragState,
    pixel: Option<PixelDragState>,
    promotion: PromotionTracker,
    scroller: AutoScroller,
    selection_mode: bool,
    started_in_selection_mode: bool,
    pointer_captured: bool,
    last_client: Option<Point>,
}

impl SelectionEngine {
    pub fn new(config: Config) -> Self {
        let promotion = PromotionTracker::new(config.gesture.promotion_distance);
        let scroller = AutoScroller::new(
            config.auto_scroll.edge_threshold,
            config.auto_scroll.max_speed,
        );
        Self {
            config,
            grid: GridGeometry::default(),
            drag: DragState::new(),
            pixel: None,
            promotion,
            scroller,
            selection_mode: false,
            started_in_selection_mode: false,
            pointer_captured: false,
            last_client: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Update grid shape and zoom. Call on every render.
    pub fn set_grid(&mut self, grid: GridGeometry) {
        self.grid = grid;
    }

    pub fn grid(&self) -> GridGeometry {
        self.grid
    }

    /// Layout for the current zoom level.
    pub fn metrics(&self) -> GridMetrics {
        GridMetrics::new(self.grid.cell_size, &self.config.grid)
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    /// Mirror the host's selection-mode flag. Switching it off cancels any gesture.
    pub fn set_selection_mode(&mut self, active: bool) -> Vec<EngineEffect> {
        if active == self.selection_mode {
            return Vec::new();
        }
        log::debug!("selection mode {}", if active { "on" } else { "off" });
        self.selection_mode = active;
        self.promotion.cancel();
        if active {
            Vec::new()
        } else {
            self.reset()
        }
    }

    // ── Cell-level gesture API ──────────────────────────────────────

    /// Begin a gesture at a cell. The additive flag is taken from `modifiers` once.
    pub fn start(&mut self, row: usize, col: usize, modifiers: Modifiers) -> Vec<EngineEffect> {
        let cell = self.grid.size.clamp(row as i64, col as i64);
        let origin = self.metrics().cell_center(cell);
        self.begin_drag(cell, origin, modifiers.is_additive(), self.selection_mode)
    }

    /// Move the gesture's end cell. Ignored when not dragging.
    pub fn extend(&mut self, row: usize, col: usize) -> bool {
        let cell = self.grid.size.clamp(row as i64, col as i64);
        self.drag.extend(cell.row, cell.col)
    }

    /// Stop dragging and describe the gesture. The rectangle stays readable until `reset`.
    pub fn end(&mut self) -> Option<GestureSummary> {
        if !self.drag.end() {
            return None;
        }
        self.scroller.cancel();
        let rect = resolve_rect(&self.drag)?;
        Some(GestureSummary::new(
            rect,
            self.started_in_selection_mode,
            self.drag.is_additive(),
        ))
    }

    /// Clear the gesture, stop auto-scroll, and release pointer capture. Valid any time.
    pub fn reset(&mut self) -> Vec<EngineEffect> {
        let had_gesture = self.drag.span().is_some();
        self.drag.reset();
        self.pixel = None;
        self.scroller.cancel();
        self.started_in_selection_mode = false;
        self.last_client = None;

        let mut effects = Vec::new();
        if self.pointer_captured {
            self.pointer_captured = false;
            effects.push(EngineEffect::ReleasePointer);
        }
        if had_gesture {
            effects.push(EngineEffect::Redraw);
        }
        effects
    }

    /// Tear down on unmount: drops any pending press and any live gesture.
    pub fn unmount(&mut self) -> Vec<EngineEffect> {
        self.promotion.cancel();
        self.reset()
    }

    // ── Pointer events ──────────────────────────────────────────────

    /// Pointer pressed. In selection mode this starts a drag on the cell under the
    /// pointer; otherwise it records a press that may be promoted later.
    pub fn on_pointer_down(
        &mut self,
        event: PointerEvent,
        viewport: &dyn ScrollViewport,
    ) -> Vec<EngineEffect> {
        if self.drag.is_dragging() {
            return Vec::new();
        }
        let content = viewport.to_content(event.client);
        let Some(cell) = self.metrics().hit_cell(content.x, content.y, self.grid.size) else {
            log::trace!("press at ({:.0}, {:.0}) is outside the cells", content.x, content.y);
            self.promotion.cancel();
            return Vec::new();
        };

        if self.selection_mode {
            self.last_client = Some(event.client);
            self.scroller.set_pointer(event.client.y);
            self.begin_drag(cell, content, event.modifiers.is_additive(), true)
        } else {
            self.promotion.arm(content, event.client, event.modifiers);
            Vec::new()
        }
    }

    /// Pointer moved. Promotes a pending press once it travels far enough, then chases
    /// the pointer with the drag end and starts edge auto-scroll when needed.
    pub fn on_pointer_move(
        &mut self,
        event: PointerEvent,
        viewport: &dyn ScrollViewport,
    ) -> Vec<EngineEffect> {
        let mut effects = Vec::new();

        if !self.drag.is_dragging() {
            let Some(press) = self.promotion.observe(event.client) else {
                return effects;
            };
            self.selection_mode = true;
            effects.push(EngineEffect::EnterSelectionMode);
            let cell = self
                .metrics()
                .clamped_cell(press.origin_px.x, press.origin_px.y, self.grid.size);
            effects.extend(self.begin_drag(
                cell,
                press.origin_px,
                press.modifiers.is_additive(),
                false,
            ));
        }

        self.last_client = Some(event.client);
        self.scroller.set_pointer(event.client.y);
        self.follow_pointer(viewport);
        effects.push(EngineEffect::Redraw);

        if self.scroller.begin(viewport) {
            effects.push(EngineEffect::RequestFrame);
        }
        effects
    }

    /// One auto-scroll frame. On `Continue` the host redraws and requests another frame.
    pub fn on_frame(&mut self, viewport: &mut dyn ScrollViewport) -> FrameAction {
        let action = self.scroller.tick(viewport, self.drag.is_dragging());
        if action == FrameAction::Continue {
            self.follow_pointer(viewport);
        }
        action
    }

    /// Pointer released. Commits the gesture, if any, and resets.
    pub fn on_pointer_up<I, L>(&mut self, lookup: &L) -> PointerUp<I>
    where
        I: Eq + Hash + Clone,
        L: ItemLookup<I> + ?Sized,
    {
        if self.promotion.cancel() {
            log::trace!("press released before promotion; treated as click");
        }
        let commit = self.end().map(|summary| Committed {
            outcome: commit(&summary, self.config.commit.single_cell, lookup),
            summary,
        });
        PointerUp {
            effects: self.reset(),
            commit,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn pixel_drag(&self) -> Option<&PixelDragState> {
        self.pixel.as_ref()
    }

    pub fn selection_rect(&self) -> Option<SelectionRect> {
        resolve_rect(&self.drag)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.scroller.is_running()
    }

    pub fn has_pointer_capture(&self) -> bool {
        self.pointer_captured
    }

    pub fn is_press_pending(&self) -> bool {
        self.promotion.is_armed()
    }

    // ── Internals ───────────────────────────────────────────────────

    fn begin_drag(
        &mut self,
        cell: GridPoint,
        origin_px: Point,
        additive: bool,
        in_selection_mode: bool,
    ) -> Vec<EngineEffect> {
        if !self.drag.start(cell.row, cell.col, additive) {
            return Vec::new();
        }
        self.pixel = Some(PixelDragState::new(origin_px));
        self.started_in_selection_mode = in_selection_mode;

        let mut effects = Vec::new();
        if !self.pointer_captured {
            self.pointer_captured = true;
            effects.push(EngineEffect::CapturePointer);
        }
        effects.push(EngineEffect::Redraw);
        effects
    }

    /// Re-derive the drag box and end cell from the last client position, reading the
    /// scroll offset fresh.
    fn follow_pointer(&mut self, viewport: &dyn ScrollViewport) {
        if !self.drag.is_dragging() {
            return;
        }
        let Some(client) = self.last_client else {
            return;
        };
        let content = viewport.to_content(client);
        if let Some(pixel) = self.pixel.as_mut() {
            pixel.current_px = content;
        }
        let cell = self.metrics().clamped_cell(content.x, content.y, self.grid.size);
        self.drag.extend(cell.row, cell.col);
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
