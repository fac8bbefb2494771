//! # TileKit Editor
//!
//! The interactive editing engine for tile-based levels. Users work on a
//! sparse grid of stacked tiles and on freely placed objects through pointer
//! tools, with full undo/redo, floating tile selections, clipboard support
//! and grid snapping for object placement.
//!
//! ## Core Components
//!
//! ### Models
//! - **Grid**: sparse map of tile stacks with a fixed extent
//! - **Objects**: class pool plus placed instances in z-order
//! - **Selections**: tile selection (selected or floating) and object selection
//!
//! ### Editing
//! - **Commands**: every mutation is an undoable [`EditorCommand`]
//! - **History**: done/undone stacks with depth eviction
//! - **Tools**: select, draw, erase, brush, fill, object select, object draw
//! - **Controller**: owns a session and dispatches events to the active tool
//!
//! ## Architecture
//!
//! ```text
//! LevelController
//!   ├── Level (grid, objects, tile selection)
//!   ├── CommandHistory
//!   ├── Viewport
//!   ├── OverlayLayer (markers for the renderer)
//!   ├── ClipboardService
//!   └── PointerTool (one active at a time)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tilekit_editor::{LevelController, PointerEventInfo, TileId, ToolKind};
//!
//! let mut controller = LevelController::default();
//! controller.set_tool(ToolKind::TileDraw);
//! controller.set_active_tile(Some(TileId(7)));
//! controller.start_pointer_sequence(PointerEventInfo::primary(40.0, 56.0));
//! controller.end_pointer_sequence(PointerEventInfo::primary(40.0, 56.0));
//! ```

pub mod brush;
pub mod buffer;
pub mod clipboard;
pub mod commands;
pub mod controller;
pub mod grid;
pub mod history;
pub mod level;
pub mod objects;
pub mod overlay;
pub mod selection;
pub mod snapping;
pub mod tools;
pub mod viewport;

pub use brush::{BrushId, BrushRegistry, CheckerBrush, StaticBrush, TileBrush};
pub use buffer::TileEditBuffer;
pub use clipboard::{
    ClipboardPayload, ClipboardService, MemoryClipboard, PayloadKind, TextBackend, TextClipboard,
    CLIPBOARD_FORMAT,
};
pub use commands::{CompoundCommand, EditorCommand, ObjectMove};
pub use controller::LevelController;
pub use grid::{LocatedTile, TileEdit, TileGrid, TileId, TileStack};
pub use history::CommandHistory;
pub use level::Level;
pub use objects::{
    HitTest, ObjectClass, ObjectClassId, ObjectInstance, ObjectLayer, ObjectPool, ZOrder,
};
pub use overlay::{OverlayId, OverlayLayer, OverlayMarker, OverlaySink};
pub use selection::{
    ObjectRecord, ObjectSelection, ObjectSelectionPayload, PayloadCell, SelectionMode,
    TileSelection, TileSelectionPayload,
};
pub use snapping::{SnapTarget, SnappingManager};
pub use tools::{
    build_tool, ActiveSources, CommandKey, Modifiers, PointerButton, PointerEventInfo,
    PointerTool, ToolKind,
};
pub use viewport::Viewport;
