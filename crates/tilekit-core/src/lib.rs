//! # TileKit Core
//!
//! Core types and utilities shared by the TileKit crates.
//! Provides the geometry value types used for level and view space,
//! the error taxonomy, and single-threaded sharing aliases.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod types;

pub use error::{ClipboardError, EditorError};

pub use geometry::{Point, Rect, Size, TileCoord, TileRegion};

// Re-export type aliases for convenience
pub use types::{shared, Shared};
