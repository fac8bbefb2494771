//! Clipboard service used by the cut/copy/paste commands.
//!
//! Tools talk to an injected [`ClipboardService`] rather than a process-wide
//! clipboard. [`MemoryClipboard`] keeps payloads in memory; [`TextClipboard`]
//! stores them as a tagged JSON envelope on any text backend, such as the
//! system clipboard.

use crate::selection::{ObjectSelectionPayload, TileSelectionPayload};
use serde::{Deserialize, Serialize};
use std::fmt;
use tilekit_core::ClipboardError;

/// Envelope format marker written alongside every text payload.
pub const CLIPBOARD_FORMAT: &str = "tilekit/1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Tiles,
    Objects,
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadKind::Tiles => write!(f, "tiles"),
            PayloadKind::Objects => write!(f, "objects"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ClipboardPayload {
    Tiles(TileSelectionPayload),
    Objects(ObjectSelectionPayload),
}

impl ClipboardPayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            ClipboardPayload::Tiles(_) => PayloadKind::Tiles,
            ClipboardPayload::Objects(_) => PayloadKind::Objects,
        }
    }
}

/// Storage for selection payloads.
///
/// Methods take `&mut self` because system clipboard backends need exclusive
/// access even to read.
pub trait ClipboardService {
    /// True if the clipboard holds a payload of `kind`.
    fn contains(&mut self, kind: PayloadKind) -> bool;

    fn set(&mut self, payload: ClipboardPayload) -> Result<(), ClipboardError>;

    /// Reads a payload of `kind`.
    fn get(&mut self, kind: PayloadKind) -> Result<ClipboardPayload, ClipboardError>;
}

fn check_kind(
    payload: ClipboardPayload,
    kind: PayloadKind,
) -> Result<ClipboardPayload, ClipboardError> {
    if payload.kind() == kind {
        Ok(payload)
    } else {
        Err(ClipboardError::WrongKind {
            expected: kind.to_string(),
            found: payload.kind().to_string(),
        })
    }
}

/// In-process clipboard.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    payload: Option<ClipboardPayload>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardService for MemoryClipboard {
    fn contains(&mut self, kind: PayloadKind) -> bool {
        self.payload.as_ref().is_some_and(|p| p.kind() == kind)
    }

    fn set(&mut self, payload: ClipboardPayload) -> Result<(), ClipboardError> {
        self.payload = Some(payload);
        Ok(())
    }

    fn get(&mut self, kind: PayloadKind) -> Result<ClipboardPayload, ClipboardError> {
        let payload = self.payload.clone().ok_or(ClipboardError::Empty)?;
        check_kind(payload, kind)
    }
}

/// A clipboard that stores plain text.
pub trait TextBackend {
    fn get_text(&mut self) -> Result<String, ClipboardError>;
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    format: String,
    payload: ClipboardPayload,
}

/// Stores payloads as JSON text on a [`TextBackend`].
#[derive(Debug, Clone, Default)]
pub struct TextClipboard<B> {
    backend: B,
}

impl<B: TextBackend> TextClipboard<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError> {
        let text = self.backend.get_text()?;
        if text.trim().is_empty() {
            return Err(ClipboardError::Empty);
        }
        let envelope: Envelope =
            serde_json::from_str(&text).map_err(|e| ClipboardError::Malformed(e.to_string()))?;
        if envelope.format != CLIPBOARD_FORMAT {
            return Err(ClipboardError::Malformed(format!(
                "unknown format '{}'",
                envelope.format
            )));
        }
        Ok(envelope.payload)
    }
}

impl<B: TextBackend> ClipboardService for TextClipboard<B> {
    fn contains(&mut self, kind: PayloadKind) -> bool {
        match self.read() {
            Ok(payload) => payload.kind() == kind,
            Err(ClipboardError::Empty) => false,
            Err(e) => {
                tracing::debug!("Clipboard does not hold {}: {}", kind, e);
                false
            }
        }
    }

    fn set(&mut self, payload: ClipboardPayload) -> Result<(), ClipboardError> {
        let envelope = Envelope {
            format: CLIPBOARD_FORMAT.to_string(),
            payload,
        };
        let text =
            serde_json::to_string(&envelope).map_err(|e| ClipboardError::Malformed(e.to_string()))?;
        self.backend.set_text(text)
    }

    fn get(&mut self, kind: PayloadKind) -> Result<ClipboardPayload, ClipboardError> {
        let payload = self.read()?;
        check_kind(payload, kind)
    }
}
