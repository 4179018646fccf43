// Edge auto-scroll while drag-selecting: proximity speed model, viewport adapters,
// and a per-frame tick that stops rescheduling as soon as there is nothing to do.
//
// Only the vertical axis auto-scrolls. A drag that leaves the viewport sideways clamps
// to the first or last column instead.

use crate::input::Point;

/// Default distance from a viewport edge, in pixels, at which auto-scroll kicks in.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 100.0;

/// Default top speed in pixels per frame, reached at (or past) the edge.
pub const DEFAULT_MAX_SPEED: f32 = 30.0;

/// Signed scroll speed for a pointer at `pointer_y` inside a viewport spanning
/// `top..bottom` (client coordinates). Negative scrolls up, positive scrolls down.
///
/// `ratio = 1 - clamp(distance, 0, threshold) / threshold`, so a pointer on or beyond
/// an edge scrolls at `max_speed` and one further than `threshold` inside is still.
pub fn edge_scroll_speed(
    pointer_y: f32,
    top: f32,
    bottom: f32,
    threshold: f32,
    max_speed: f32,
) -> f32 {
    if threshold <= 0.0 {
        return 0.0;
    }
    let ratio = |distance: f32| 1.0 - distance.clamp(0.0, threshold) / threshold;

    let from_top = pointer_y - top;
    if from_top < threshold {
        return -max_speed * ratio(from_top);
    }
    let from_bottom = bottom - pointer_y;
    if from_bottom < threshold {
        return max_speed * ratio(from_bottom);
    }
    0.0
}

/// A scrollable area hosting the grid content.
pub trait ScrollViewport {
    /// Client-space `(top, bottom)` of the visible area, for edge proximity.
    fn edge_bounds(&self) -> (f32, f32);

    /// Client-space position of the content's top-left corner when unscrolled.
    fn content_origin(&self) -> Point;

    /// Current scroll offset. Read fresh on every use; auto-scroll mutates it between events.
    fn scroll_offset(&self) -> Point;

    /// Scroll vertically by `dy` pixels. Implementations clamp to the scrollable range.
    fn scroll_by(&mut self, dy: f32);

    /// Content-relative position of a client-space point at the current scroll offset.
    fn to_content(&self, client: Point) -> Point {
        let origin = self.content_origin();
        let scroll = self.scroll_offset();
        Point::new(client.x - origin.x + scroll.x, client.y - origin.y + scroll.y)
    }
}

/// A dedicated scrollable container element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollContainer {
    /// Client-space top-left of the container box.
    pub origin: Point,
    pub height: f32,
    pub scroll_left: f32,
    pub scroll_top: f32,
    pub max_scroll_top: f32,
}

impl ScrollViewport for ScrollContainer {
    fn edge_bounds(&self) -> (f32, f32) {
        (self.origin.y, self.origin.y + self.height)
    }

    fn content_origin(&self) -> Point {
        self.origin
    }

    fn scroll_offset(&self) -> Point {
        Point::new(self.scroll_left, self.scroll_top)
    }

    fn scroll_by(&mut self, dy: f32) {
        self.scroll_top = (self.scroll_top + dy).clamp(0.0, self.max_scroll_top.max(0.0));
    }
}

/// Window-level scrolling, used when the host supplies no container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowViewport {
    pub viewport_height: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub max_scroll_y: f32,
    /// Document-space top-left of the grid content.
    pub grid_origin: Point,
}

impl ScrollViewport for WindowViewport {
    fn edge_bounds(&self) -> (f32, f32) {
        (0.0, self.viewport_height)
    }

    fn content_origin(&self) -> Point {
        self.grid_origin
    }

    fn scroll_offset(&self) -> Point {
        Point::new(self.scroll_x, self.scroll_y)
    }

    fn scroll_by(&mut self, dy: f32) {
        self.scroll_y = (self.scroll_y + dy).clamp(0.0, self.max_scroll_y.max(0.0));
    }
}

/// Pick the dedicated container if there is one, else fall back to the window.
pub fn viewport_or_window<'a>(
    container: Option<&'a mut ScrollContainer>,
    window: &'a mut WindowViewport,
) -> &'a mut dyn ScrollViewport {
    match container {
        Some(c) => c as &mut dyn ScrollViewport,
        None => window,
    }
}

/// What the host should do after a frame tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    /// Schedule another frame.
    Continue,
    /// Do not schedule another frame; the loop is finished.
    Stop,
}

/// Drives edge auto-scroll one frame at a time.
///
/// The loop is a cooperative periodic task: the host requests a frame when `begin`
/// returns true and calls `tick` once per frame until it returns `Stop`. `cancel`
/// stops it from outside (drag end, unmount, selection mode switched off).
#[derive(Debug, Clone)]
pub struct AutoScroller {
    threshold: f32,
    max_speed: f32,
    pointer_y: Option<f32>,
    running: bool,
}

impl AutoScroller {
    pub fn new(threshold: f32, max_speed: f32) -> Self {
        Self {
            threshold,
            max_speed,
            pointer_y: None,
            running: false,
        }
    }

    /// Record the pointer's latest client Y.
    pub fn set_pointer(&mut self, client_y: f32) {
        self.pointer_y = Some(client_y);
    }

    /// Speed the next tick would scroll at.
    pub fn speed(&self, viewport: &dyn ScrollViewport) -> f32 {
        match self.pointer_y {
            Some(y) => {
                let (top, bottom) = viewport.edge_bounds();
                edge_scroll_speed(y, top, bottom, self.threshold, self.max_speed)
            }
            None => 0.0,
        }
    }

    /// Mark the loop running if the pointer is in an edge zone and no loop is live.
    /// Returns true when the host must request the first frame.
    pub fn begin(&mut self, viewport: &dyn ScrollViewport) -> bool {
        if self.running || self.speed(viewport) == 0.0 {
            return false;
        }
        log::trace!("auto-scroll loop started");
        self.running = true;
        true
    }

    /// Run one frame. Scrolls and asks to continue while `dragging` and the speed is
    /// non-zero; otherwise marks the loop finished.
    pub fn tick(&mut self, viewport: &mut dyn ScrollViewport, dragging: bool) -> FrameAction {
        if !self.running {
            return FrameAction::Stop;
        }
        let speed = if dragging { self.speed(viewport) } else { 0.0 };
        if speed == 0.0 {
            log::trace!("auto-scroll loop stopped");
            self.running = false;
            return FrameAction::Stop;
        }
        viewport.scroll_by(speed);
        log::trace!("auto-scrolled {speed:.1}px");
        FrameAction::Continue
    }

    /// Stop the loop and forget the pointer.
    pub fn cancel(&mut self) {
        if self.running {
            log::trace!("auto-scroll loop cancelled");
        }
        self.running = false;
        self.pointer_y = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for AutoScroller {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_THRESHOLD, DEFAULT_MAX_SPEED)
    }
}
