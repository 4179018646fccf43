//! Rectangular drag selection for zoomable placement grids.
//!
//! The host grid feeds pointer events into a [`engine::SelectionEngine`] and applies the
//! [`engine::EngineEffect`]s it returns; on release the engine resolves the dragged cell
//! rectangle into an item-id selection update through the grid's position lookup.

pub mod config;
pub mod engine;
pub mod grid;
pub mod input;
pub mod replay;
pub mod scroll;
