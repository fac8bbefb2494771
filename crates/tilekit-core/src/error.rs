//! Error handling for TileKit
//!
//! Provides error types for the layers of the editor:
//! - Editor errors (gesture state, coordinates, missing sources)
//! - Clipboard errors (backend and payload problems)
//!
//! Interactive code paths are precondition-guarded and only log editor
//! errors; clipboard backends return clipboard errors.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Editor error type
///
/// Represents faults raised by the editing engine: pointer gestures arriving
/// in the wrong state, coordinates outside the level, and gestures started
/// without anything to paint or place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// A pointer sequence entry point was called in a state that cannot accept it
    #[error("Invalid gesture state for {tool}: {reason}")]
    InvalidGestureState {
        /// The tool that received the event.
        tool: String,
        /// Why the event could not be accepted.
        reason: String,
    },

    /// A cell address lies outside the tile grid
    #[error("Coordinate ({x}, {y}) is outside the grid")]
    OutOfRange {
        /// Column of the offending cell.
        x: i32,
        /// Row of the offending cell.
        y: i32,
    },

    /// A draw gesture started with no active tile, brush or object class
    #[error("No active {source_kind} selected")]
    MissingSource {
        /// The kind of source that was missing.
        source_kind: String,
    },

    /// An object class name could not be resolved in the pool
    #[error("Unknown object class '{0}'")]
    UnknownObjectClass(String),
}

/// Clipboard error type
///
/// Represents failures while moving selection payloads through a clipboard
/// service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipboardError {
    /// The clipboard backend could not be reached
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard holds no data
    #[error("Clipboard is empty")]
    Empty,

    /// The clipboard holds data of a different kind than requested
    #[error("Clipboard holds {found} data, expected {expected}")]
    WrongKind {
        /// The payload kind that was requested.
        expected: String,
        /// The payload kind that was found.
        found: String,
    },

    /// The clipboard data could not be decoded
    #[error("Malformed clipboard payload: {0}")]
    Malformed(String),
}
