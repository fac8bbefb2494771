//! Configuration and settings management for TileKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Grid settings (tile size, extent, origin)
//! - Snapping defaults for object placement
//! - Auto-scroll behaviour during drag gestures
//! - History depth
//! - Initial view

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tilekit_core::constants;

/// Reference geometry an object is aligned to when snapped onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapTarget {
    /// No snapping; the pointer position is used as-is
    #[default]
    None,
    /// The object's origin point lands on a grid intersection
    Origin,
    /// The object's image bounds land on grid lines
    ImageBounds,
    /// The object's mask bounds land on grid lines
    MaskBounds,
}

impl std::fmt::Display for SnapTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Origin => write!(f, "origin"),
            Self::ImageBounds => write!(f, "image_bounds"),
            Self::MaskBounds => write!(f, "mask_bounds"),
        }
    }
}

/// Tile grid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Tile width in level units
    pub tile_width: u32,
    /// Tile height in level units
    pub tile_height: u32,
    /// Grid width in tiles
    pub tiles_wide: u32,
    /// Grid height in tiles
    pub tiles_high: u32,
    /// Column of the first cell
    pub origin_x: i32,
    /// Row of the first cell
    pub origin_y: i32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            tile_width: constants::DEFAULT_TILE_WIDTH,
            tile_height: constants::DEFAULT_TILE_HEIGHT,
            tiles_wide: constants::DEFAULT_TILES_WIDE,
            tiles_high: constants::DEFAULT_TILES_HIGH,
            origin_x: 0,
            origin_y: 0,
        }
    }
}

/// Object snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnappingSettings {
    /// Default snap target for object placement and moves
    pub target: SnapTarget,
    /// Snap grid cell width in level units
    pub grid_width: f64,
    /// Snap grid cell height in level units
    pub grid_height: f64,
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            target: SnapTarget::None,
            grid_width: constants::DEFAULT_TILE_WIDTH as f64,
            grid_height: constants::DEFAULT_TILE_HEIGHT as f64,
        }
    }
}

/// Auto-scroll settings for drag gestures near the viewport edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoScrollSettings {
    pub enabled: bool,
    /// Distance from the edge, in view pixels, where scrolling starts
    pub edge_margin: f64,
    /// Scroll speed at the very edge, in view pixels per tick
    pub max_speed: f64,
    /// Interval between ticks in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for AutoScrollSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            edge_margin: constants::AUTO_SCROLL_EDGE_MARGIN,
            max_speed: constants::AUTO_SCROLL_MAX_SPEED,
            tick_interval_ms: constants::AUTO_SCROLL_TICK_MS,
        }
    }
}

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum undo depth; 0 keeps every entry
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: constants::DEFAULT_HISTORY_DEPTH,
        }
    }
}

/// Initial view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Viewport width in pixels
    pub width: f64,
    /// Viewport height in pixels
    pub height: f64,
    pub zoom: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            width: constants::DEFAULT_VIEW_WIDTH,
            height: constants::DEFAULT_VIEW_HEIGHT,
            zoom: 1.0,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub grid: GridSettings,
    pub snapping: SnappingSettings,
    pub auto_scroll: AutoScrollSettings,
    pub history: HistorySettings,
    pub view: ViewSettings,
}

impl EditorConfig {
    /// Create new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the configuration file.
    pub fn config_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no config directory on this platform".to_string())
        })?;
        Ok(dir.join("tilekit").join("config.toml"))
    }

    /// Load configuration from the default location, falling back to defaults.
    pub fn load_or_default() -> Self {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Using default config: {}", e);
                return Self::default();
            }
        };
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Self::format_of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.toml` or `.json` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> SettingsResult<()> {
        if self.grid.tile_width == 0 || self.grid.tile_height == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "grid.tile_size".to_string(),
                reason: "tile dimensions must be > 0".to_string(),
            });
        }

        if self.grid.tiles_wide == 0 || self.grid.tiles_high == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "grid.extent".to_string(),
                reason: "grid must contain at least one tile".to_string(),
            });
        }

        if self.snapping.grid_width <= 0.0 || self.snapping.grid_height <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "snapping.grid".to_string(),
                reason: "snap grid dimensions must be > 0".to_string(),
            });
        }

        if self.auto_scroll.edge_margin <= 0.0 || self.auto_scroll.max_speed < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "auto_scroll".to_string(),
                value: format!(
                    "margin {} speed {}",
                    self.auto_scroll.edge_margin, self.auto_scroll.max_speed
                ),
            }
            .into());
        }

        if self.view.width <= 0.0 || self.view.height <= 0.0 {
            return Err(SettingsError::InvalidSetting {
                key: "view.size".to_string(),
                reason: "viewport dimensions must be > 0".to_string(),
            });
        }

        if !(constants::MIN_ZOOM..=constants::MAX_ZOOM).contains(&self.view.zoom) {
            return Err(ConfigError::ValueOutOfRange {
                key: "view.zoom".to_string(),
                value: self.view.zoom.to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn format_of(path: &Path) -> SettingsResult<Format> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

enum Format {
    Json,
    Toml,
}
