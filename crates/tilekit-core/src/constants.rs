//! Default values shared across the TileKit crates.

/// Default tile width in level units.
pub const DEFAULT_TILE_WIDTH: u32 = 16;

/// Default tile height in level units.
pub const DEFAULT_TILE_HEIGHT: u32 = 16;

/// Default grid width in tiles.
pub const DEFAULT_TILES_WIDE: u32 = 64;

/// Default grid height in tiles.
pub const DEFAULT_TILES_HIGH: u32 = 64;

/// Default number of undo steps kept by the command history.
pub const DEFAULT_HISTORY_DEPTH: usize = 200;

/// Distance from the viewport edge, in view pixels, where auto-scroll starts.
pub const AUTO_SCROLL_EDGE_MARGIN: f64 = 24.0;

/// Maximum auto-scroll speed in view pixels per tick.
pub const AUTO_SCROLL_MAX_SPEED: f64 = 18.0;

/// Interval between auto-scroll ticks in milliseconds.
pub const AUTO_SCROLL_TICK_MS: u64 = 30;

/// Zoom limits for the viewport.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 50.0;

/// Default viewport size in view pixels.
pub const DEFAULT_VIEW_WIDTH: f64 = 1200.0;
pub const DEFAULT_VIEW_HEIGHT: f64 = 800.0;
