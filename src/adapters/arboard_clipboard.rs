//! System clipboard adapter using arboard.

use crate::traits::{ClipboardBackend, ClipboardError};

/// System clipboard via `arboard`.
///
/// A fresh [`arboard::Clipboard`] is opened per call so nothing holds the
/// clipboard between a copy and the timed clear.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }

    fn open() -> Result<arboard::Clipboard, ClipboardError> {
        arboard::Clipboard::new().map_err(classify)
    }
}

fn classify(err: arboard::Error) -> ClipboardError {
    match err {
        arboard::Error::ClipboardOccupied => ClipboardError::Busy(err.to_string()),
        other => ClipboardError::Unavailable(other.to_string()),
    }
}

impl ClipboardBackend for ArboardClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        Self::open()?.set_text(text.to_owned()).map_err(classify)
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        Self::open()?.clear().map_err(classify)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_occupied_as_busy() {
        assert!(matches!(
            classify(arboard::Error::ClipboardOccupied),
            ClipboardError::Busy(_)
        ));
        assert!(matches!(
            classify(arboard::Error::ClipboardNotSupported),
            ClipboardError::Unavailable(_)
        ));
    }
}
