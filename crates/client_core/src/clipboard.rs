use thiserror::Error;
use tracing::warn;

use crate::{notification::Notification, ClientContext};

pub const COPIED_TEXT: &str = "Copied to clipboard";
pub const COPY_FAILED_TEXT: &str = "Failed to copy to clipboard";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write was refused: {0}")]
    Refused(String),
}

/// Destination for copy actions. Front ends plug in the system clipboard.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

pub struct MissingClipboard;

impl ClipboardSink for MissingClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "no clipboard attached to this client".to_string(),
        ))
    }
}

impl ClientContext {
    /// Writes `text` to the clipboard and reports the result as a
    /// notification. Refusals are reported instead of assumed away.
    pub fn copy(&self, text: &str) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.notifications.set(Notification::success(COPIED_TEXT));
                true
            }
            Err(err) => {
                warn!("links: clipboard write failed: {err}");
                self.notifications.set(Notification::error(COPY_FAILED_TEXT));
                false
            }
        }
    }
}
