use arboard::Clipboard;
use client_core::{ClipboardError, ClipboardSink};

/// System clipboard. A fresh handle is opened per write.
pub struct ArboardClipboard;

impl ClipboardSink for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            Clipboard::new().map_err(|err| ClipboardError::Unavailable(err.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| ClipboardError::Refused(err.to_string()))
    }
}
