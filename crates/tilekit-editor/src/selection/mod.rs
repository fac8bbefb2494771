//! Selection models for tiles and objects.

pub mod object;
pub mod tile;

pub use object::{ObjectRecord, ObjectSelection, ObjectSelectionPayload, SelectedObject};
pub use tile::{
    PayloadCell, SelectionMode, TileSelection, TileSelectionPayload, TileSelectionSnapshot,
};
