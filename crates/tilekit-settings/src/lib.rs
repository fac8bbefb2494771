//! TileKit Settings Crate
//!
//! Handles editor configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{
    AutoScrollSettings, EditorConfig, GridSettings, HistorySettings, SnapTarget, SnappingSettings,
    ViewSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
