//! Clipboard backend trait abstraction.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// The clipboard could not be opened (no display server, sandbox, ...).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// Another process currently owns the clipboard.
    #[error("clipboard busy: {0}")]
    Busy(String),
}

/// Trait for writing and clearing the system clipboard.
///
/// Implementations must be cheap to call from a timer task; they are not
/// expected to hold the clipboard open between calls.
pub trait ClipboardBackend: Send + Sync {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;

    fn clear(&self) -> Result<(), ClipboardError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_error_display() {
        assert_eq!(
            ClipboardError::Busy("held by pid 42".to_string()).to_string(),
            "clipboard busy: held by pid 42"
        );
        assert_eq!(
            ClipboardError::Unavailable("no display".to_string()).to_string(),
            "clipboard unavailable: no display"
        );
    }
}
