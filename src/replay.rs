// Headless replay of a recorded pointer trace against a grid, for debugging gestures
// without a UI.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::config::types::Config;
use crate::engine::{EngineEffect, GridGeometry, SelectionEngine};
use crate::grid::{GridPoint, LabelError};
use crate::input::{Modifiers, Point, PointerEvent};
use crate::scroll::{FrameAction, WindowViewport};

/// Errors from loading or replaying a trace.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid trace: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid item position: {0}")]
    Label(#[from] LabelError),
}

/// A recorded session: grid, placed items, prior selection, and pointer events.
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    pub grid: TraceGrid,
    #[serde(default)]
    pub viewport: TraceViewport,
    /// Position label (`A1`) → item id.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
    #[serde(default)]
    pub selection_mode: bool,
    #[serde(default)]
    pub prior: Vec<String>,
    pub events: Vec<TraceEvent>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TraceGrid {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
}

/// Window viewport the trace was recorded in.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TraceViewport {
    pub height: f32,
    pub scroll_y: f32,
    pub max_scroll_y: f32,
    pub origin: TracePoint,
}

impl Default for TraceViewport {
    fn default() -> Self {
        Self {
            height: 800.0,
            scroll_y: 0.0,
            max_scroll_y: 0.0,
            origin: TracePoint::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TracePoint {
    pub x: f32,
    pub y: f32,
}

/// One recorded event. Coordinates are client pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceEvent {
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        additive: bool,
    },
    Move {
        x: f32,
        y: f32,
    },
    Frame,
    Up,
}

/// Outcome of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Final selection, sorted.
    pub selection: Vec<String>,
    pub selection_mode: bool,
    pub commits: usize,
    pub clicks: usize,
    pub scrolled_frames: usize,
    pub scroll_y: f32,
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}

/// Replay `trace` through a fresh engine built from `config`.
pub fn run_trace(trace: &Trace, config: Config) -> Result<ReplayReport, ReplayError> {
    let items = trace
        .items
        .iter()
        .map(|(label, id)| Ok((GridPoint::from_label(label)?, id.clone())))
        .collect::<Result<HashMap<GridPoint, String>, LabelError>>()?;

    let mut viewport = WindowViewport {
        viewport_height: trace.viewport.height,
        scroll_x: 0.0,
        scroll_y: trace.viewport.scroll_y,
        max_scroll_y: trace.viewport.max_scroll_y,
        grid_origin: Point::new(trace.viewport.origin.x, trace.viewport.origin.y),
    };

    let mut engine = SelectionEngine::new(config);
    engine.set_grid(GridGeometry::new(
        trace.grid.rows,
        trace.grid.cols,
        trace.grid.cell_size,
    ));
    engine.set_selection_mode(trace.selection_mode);

    let mut selection: HashSet<String> = trace.prior.iter().cloned().collect();
    let mut report = ReplayReport {
        selection: Vec::new(),
        selection_mode: trace.selection_mode,
        commits: 0,
        clicks: 0,
        scrolled_frames: 0,
        scroll_y: 0.0,
    };

    for event in &trace.events {
        let effects = match *event {
            TraceEvent::Down { x, y, additive } => {
                let modifiers = Modifiers {
                    shift: additive,
                    ..Modifiers::NONE
                };
                engine.on_pointer_down(PointerEvent::new(x, y, modifiers), &viewport)
            }
            TraceEvent::Move { x, y } => {
                engine.on_pointer_move(PointerEvent::new(x, y, Modifiers::NONE), &viewport)
            }
            TraceEvent::Frame => {
                if engine.on_frame(&mut viewport) == FrameAction::Continue {
                    report.scrolled_frames += 1;
                }
                Vec::new()
            }
            TraceEvent::Up => {
                let up = engine.on_pointer_up(&items);
                if let Some(committed) = up.commit {
                    match committed.next_selection(&selection) {
                        Some(next) => {
                            selection = next;
                            report.commits += 1;
                        }
                        None => report.clicks += 1,
                    }
                }
                up.effects
            }
        };
        if effects.contains(&EngineEffect::EnterSelectionMode) {
            report.selection_mode = true;
        }
    }

    let mut sorted: Vec<String> = selection.into_iter().collect();
    sorted.sort();
    report.selection = sorted;
    report.scroll_y = viewport.scroll_y;
    log::debug!(
        "replayed {} event(s): {} commit(s), {} click(s)",
        trace.events.len(),
        report.commits,
        report.clicks
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Default layout at cell_size 40: cell n is centered at 73 + 44n.
    const SCENARIO: &str = r#"{
        "grid": {"rows": 10, "cols": 10, "cell_size": 40},
        "items": {"A1": "id1", "B2": "id2", "E5": "id5"},
        "selection_mode": true,
        "events": [
            {"type": "down", "x": 73, "y": 73},
            {"type": "move", "x": 117, "y": 117},
            {"type": "up"}
        ]
    }"#;

    #[test]
    fn replays_simple_drag() {
        let trace = Trace::from_json(SCENARIO).unwrap();
        let report = run_trace(&trace, Config::default()).unwrap();
        assert_eq!(report.selection, vec!["id1", "id2"]);
        assert_eq!(report.commits, 1);
    }

    #[test]
    fn replays_promotion_and_additive_drag() {
        let json = r#"{
            "grid": {"rows": 10, "cols": 10, "cell_size": 40},
            "items": {"A1": "id1", "E5": "id5"},
            "prior": ["keep"],
            "events": [
                {"type": "down", "x": 249, "y": 249, "additive": true},
                {"type": "move", "x": 260, "y": 249},
                {"type": "move", "x": 293, "y": 249},
                {"type": "up"}
            ]
        }"#;
        let report = run_trace(&Trace::from_json(json).unwrap(), Config::default()).unwrap();
        assert!(report.selection_mode);
        assert_eq!(report.selection, vec!["id5", "keep"]);
    }

    #[test]
    fn short_press_is_a_click() {
        let json = r#"{
            "grid": {"rows": 10, "cols": 10, "cell_size": 40},
            "items": {"A1": "id1"},
            "prior": ["keep"],
            "events": [
                {"type": "down", "x": 73, "y": 73},
                {"type": "move", "x": 76, "y": 73},
                {"type": "up"}
            ]
        }"#;
        let report = run_trace(&Trace::from_json(json).unwrap(), Config::default()).unwrap();
        assert!(!report.selection_mode);
        assert_eq!(report.commits, 0);
        assert_eq!(report.selection, vec!["keep"]);
    }

    #[test]
    fn frames_scroll_the_window() {
        let json = r#"{
            "grid": {"rows": 40, "cols": 4, "cell_size": 40},
            "viewport": {"height": 600, "max_scroll_y": 1000},
            "selection_mode": true,
            "events": [
                {"type": "down", "x": 73, "y": 300},
                {"type": "move", "x": 73, "y": 590},
                {"type": "frame"},
                {"type": "frame"},
                {"type": "move", "x": 73, "y": 300},
                {"type": "frame"},
                {"type": "up"}
            ]
        }"#;
        let report = run_trace(&Trace::from_json(json).unwrap(), Config::default()).unwrap();
        assert_eq!(report.scrolled_frames, 2);
        assert!(report.scroll_y > 0.0);
    }

    #[test]
    fn bad_label_is_reported() {
        let json = r#"{
            "grid": {"rows": 1, "cols": 1, "cell_size": 40},
            "items": {"1A": "x"},
            "events": []
        }"#;
        let err = run_trace(&Trace::from_json(json).unwrap(), Config::default()).unwrap_err();
        assert!(matches!(err, ReplayError::Label(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(Trace::from_json("{"), Err(ReplayError::Json(_))));
    }

    #[test]
    fn load_reads_trace_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        std::fs::write(&path, SCENARIO).unwrap();
        let trace = Trace::load(&path).unwrap();
        assert_eq!(trace.events.len(), 3);
    }
}
