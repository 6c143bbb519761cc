//! Recording clipboard for testing.

use std::sync::{Arc, Mutex};

use crate::traits::{ClipboardBackend, ClipboardError};

/// Clipboard that keeps its contents in memory and counts clears.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    contents: Arc<Mutex<Option<String>>>,
    clear_count: Arc<Mutex<usize>>,
    set_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

impl RecordingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    /// Number of successful clears.
    pub fn clear_count(&self) -> usize {
        *self.clear_count.lock().unwrap()
    }

    pub fn set_set_should_fail(&self, should_fail: bool) {
        *self.set_should_fail.lock().unwrap() = should_fail;
    }

    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *self.clear_should_fail.lock().unwrap() = should_fail;
    }
}

impl ClipboardBackend for RecordingClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if *self.set_should_fail.lock().unwrap() {
            return Err(ClipboardError::Unavailable("Mock set failure".to_string()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClipboardError> {
        if *self.clear_should_fail.lock().unwrap() {
            return Err(ClipboardError::Busy("Mock clear failure".to_string()));
        }
        *self.contents.lock().unwrap() = None;
        *self.clear_count.lock().unwrap() += 1;
        Ok(())
    }
}
