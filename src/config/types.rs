use serde::Deserialize;
use std::path::Path;

use crate::input::promotion::DEFAULT_PROMOTION_DISTANCE;
use crate::input::selection::SingleCellPolicy;
use crate::scroll::{DEFAULT_EDGE_THRESHOLD, DEFAULT_MAX_SPEED};

/// Default config file contents, as printed by `--print-default-config`.
const DEFAULT_CONFIG_TOML: &str = r#"# gridselect configuration

[grid]
# Fixed row/column header size in pixels.
header_size = 40.0
# Container padding and border in pixels.
padding = 8.0
border = 1.0
# Inter-cell gap: gap_small below gap_threshold cell size, gap_large at or above.
gap_small = 1.0
gap_large = 4.0
gap_threshold = 40.0

[auto_scroll]
# Distance from the viewport edge (px) at which drag auto-scroll starts.
edge_threshold = 100.0
# Speed at the edge, in px per frame.
max_speed = 30.0

[gesture]
# Pointer travel (px) before a plain press becomes a selection drag.
promotion_distance = 5.0

[commit]
# Single-cell, non-additive drag started outside selection mode: "click" or "commit".
single_cell = "click"
"#;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub grid: GridConfig,
    pub auto_scroll: AutoScrollConfig,
    pub gesture: GestureConfig,
    pub commit: CommitConfig,
}

/// Grid layout constants used by the coordinate mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub header_size: f32,
    pub padding: f32,
    pub border: f32,
    pub gap_small: f32,
    pub gap_large: f32,
    pub gap_threshold: f32,
}

/// Edge auto-scroll configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoScrollConfig {
    pub edge_threshold: f32,
    pub max_speed: f32,
}

/// Press-to-drag promotion configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    pub promotion_distance: f32,
}

/// Commit policy configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommitConfig {
    pub single_cell: SingleCellPolicy,
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs (unknown keys are ignored) ───────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    grid: RawGridConfig,
    auto_scroll: RawAutoScrollConfig,
    gesture: RawGestureConfig,
    commit: RawCommitConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawGridConfig {
    header_size: f32,
    padding: f32,
    border: f32,
    gap_small: f32,
    gap_large: f32,
    gap_threshold: f32,
}

impl Default for RawGridConfig {
    fn default() -> Self {
        let d = GridConfig::default();
        Self {
            header_size: d.header_size,
            padding: d.padding,
            border: d.border,
            gap_small: d.gap_small,
            gap_large: d.gap_large,
            gap_threshold: d.gap_threshold,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawAutoScrollConfig {
    edge_threshold: f32,
    max_speed: f32,
}

impl Default for RawAutoScrollConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawGestureConfig {
    promotion_distance: f32,
}

impl Default for RawGestureConfig {
    fn default() -> Self {
        Self {
            promotion_distance: DEFAULT_PROMOTION_DISTANCE,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawCommitConfig {
    single_cell: String,
}

impl Default for RawCommitConfig {
    fn default() -> Self {
        Self {
            single_cell: SingleCellPolicy::default().name().to_string(),
        }
    }
}

// ── Default impls ───────────────────────────────────────────────────────

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            header_size: 40.0,
            padding: 8.0,
            border: 1.0,
            gap_small: 1.0,
            gap_large: 4.0,
            gap_threshold: 40.0,
        }
    }
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            promotion_distance: DEFAULT_PROMOTION_DISTANCE,
        }
    }
}

// ── Config implementation ───────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let single_cell = SingleCellPolicy::from_name(&raw.commit.single_cell).ok_or_else(|| {
            ConfigError::Validation(format!(
                "unknown single_cell policy '{}', valid policies: {}",
                raw.commit.single_cell,
                SingleCellPolicy::NAMES.join(", ")
            ))
        })?;

        let config = Self {
            grid: GridConfig {
                header_size: raw.grid.header_size,
                padding: raw.grid.padding,
                border: raw.grid.border,
                gap_small: raw.grid.gap_small,
                gap_large: raw.grid.gap_large,
                gap_threshold: raw.grid.gap_threshold,
            },
            auto_scroll: AutoScrollConfig {
                edge_threshold: raw.auto_scroll.edge_threshold,
                max_speed: raw.auto_scroll.max_speed,
            },
            gesture: GestureConfig {
                promotion_distance: raw.gesture.promotion_distance,
            },
            commit: CommitConfig { single_cell },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("grid.header_size", self.grid.header_size),
            ("grid.padding", self.grid.padding),
            ("grid.border", self.grid.border),
            ("grid.gap_small", self.grid.gap_small),
            ("grid.gap_large", self.grid.gap_large),
            ("grid.gap_threshold", self.grid.gap_threshold),
            ("gesture.promotion_distance", self.gesture.promotion_distance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!("{name} must be >= 0")));
            }
        }

        if !self.auto_scroll.edge_threshold.is_finite() || self.auto_scroll.edge_threshold <= 0.0 {
            return Err(ConfigError::Validation(
                "auto_scroll.edge_threshold must be > 0".to_string(),
            ));
        }

        if !self.auto_scroll.max_speed.is_finite() || self.auto_scroll.max_speed <= 0.0 {
            return Err(ConfigError::Validation(
                "auto_scroll.max_speed must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The default config as a commented TOML document.
    pub fn print_default() -> &'static str {
        DEFAULT_CONFIG_TOML
    }
}
