//! System clipboard backend.

use tilekit_core::ClipboardError;
use tilekit_editor::{TextBackend, TextClipboard};

/// Text backend over the desktop clipboard.
///
/// The platform clipboard is opened on first use, so building one never
/// fails even on headless machines; operations report
/// [`ClipboardError::Unavailable`] instead.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard service that stores editor payloads on the system clipboard.
    pub fn service() -> TextClipboard<Self> {
        TextClipboard::new(Self::new())
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialised".to_string()))
    }
}

impl TextBackend for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        match self.clipboard()?.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }

    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        self.clipboard()?
            .set_text(text)
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}
