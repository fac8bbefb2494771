//! # TileKit
//!
//! An interactive editing engine for 2D tile-based level maps:
//! - Sparse tile grid with stacked tiles per cell
//! - Freely placed objects with classes, z-order and grid snapping
//! - Pointer tools for selecting, drawing, erasing, brushing and filling
//! - Floating tile selections that can be moved, cut, copied and pasted
//! - Unlimited or bounded undo/redo with compound steps
//!
//! ## Architecture
//!
//! TileKit is organized as a workspace with multiple crates:
//!
//! 1. **tilekit-core** - Geometry, error types, shared constants
//! 2. **tilekit-settings** - Editor configuration and persistence
//! 3. **tilekit-editor** - Models, commands, history, tools and the controller
//! 4. **tilekit** - System clipboard, logging setup and the replay binary

pub mod cli;
pub mod clipboard;
pub mod replay;

pub use cli::Cli;
pub use clipboard::SystemClipboard;
pub use replay::{Script, Step, Summary};

pub use tilekit_core::{ClipboardError, EditorError, Point, Rect, Size, TileCoord};
pub use tilekit_editor::{
    CommandHistory, CommandKey, EditorCommand, Level, LevelController, ObjectClassId,
    OverlayMarker, PointerEventInfo, TileGrid, TileId, TileStack, ToolKind, Viewport,
};
pub use tilekit_settings::{EditorConfig, SettingsError, SnapTarget};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
