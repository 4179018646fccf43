// Drag state machine: the live rectangular selection gesture in cell and pixel space.

use crate::grid::GridPoint;
use crate::input::Point;

/// Start and end cells of a gesture. Always set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSpan {
    pub start: GridPoint,
    pub end: GridPoint,
}

/// The live gesture.
///
/// `Idle` → `start` → `Dragging` → `end` → (committer reads the span) → `reset` → `Idle`.
/// Calls that do not fit the current phase are ignored rather than reported, since
/// global pointer listeners can deliver a trailing move/up after the gesture was reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragState {
    dragging: bool,
    span: Option<DragSpan>,
    additive: bool,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture at `(row, col)`. Ignored while a gesture is already dragging.
    ///
    /// `additive` is fixed for the whole gesture.
    pub fn start(&mut self, row: usize, col: usize, additive: bool) -> bool {
        if self.dragging {
            log::trace!("drag start at ({row}, {col}) ignored: already dragging");
            return false;
        }
        let cell = GridPoint::new(row, col);
        self.span = Some(DragSpan {
            start: cell,
            end: cell,
        });
        self.additive = additive;
        self.dragging = true;
        log::debug!("drag started at {cell} (additive={additive})");
        true
    }

    /// Move the gesture's end cell. Returns true if the end cell changed.
    pub fn extend(&mut self, row: usize, col: usize) -> bool {
        if !self.dragging {
            return false;
        }
        match self.span.as_mut() {
            Some(span) if span.end != GridPoint::new(row, col) => {
                span.end = GridPoint::new(row, col);
                log::trace!("drag extended to {}", span.end);
                true
            }
            _ => false,
        }
    }

    /// Stop dragging but keep the span for the committer. Returns false if not dragging.
    pub fn end(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        true
    }

    /// Clear everything back to idle defaults. Valid from any phase.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_additive(&self) -> bool {
        self.additive
    }

    pub fn span(&self) -> Option<DragSpan> {
        self.span
    }

    pub fn drag_start(&self) -> Option<GridPoint> {
        self.span.map(|s| s.start)
    }

    pub fn drag_end(&self) -> Option<GridPoint> {
        self.span.map(|s| s.end)
    }
}

/// Sub-cell drag box for smooth visual feedback, in content pixels (scroll included).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelDragState {
    pub start_px: Point,
    pub current_px: Point,
}

impl PixelDragState {
    pub fn new(origin: Point) -> Self {
        Self {
            start_px: origin,
            current_px: origin,
        }
    }

    /// Normalized box as (top-left, bottom-right).
    pub fn bounds(&self) -> (Point, Point) {
        (
            Point::new(
                self.start_px.x.min(self.current_px.x),
                self.start_px.y.min(self.current_px.y),
            ),
            Point::new(
                self.start_px.x.max(self.current_px.x),
                self.start_px.y.max(self.current_px.y),
            ),
        )
    }
}
