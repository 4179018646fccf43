// TOML-backed overrides for the engine's layout, auto-scroll, gesture and commit constants.

pub mod types;

pub use types::{AutoScrollConfig, CommitConfig, Config, ConfigError, GestureConfig, GridConfig};
