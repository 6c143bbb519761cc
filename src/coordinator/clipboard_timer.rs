//! Clears a copied code from the clipboard when the code rotates.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::traits::{ClipboardBackend, ClipboardError};

/// What happens to a copied code after it was placed on the clipboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardPolicy {
    /// Clear the clipboard once the copied code stops being valid.
    #[default]
    UntilCodeRotates,
    /// Leave the code on the clipboard.
    Keep,
}

/// One-shot clipboard clear timer.
///
/// Every copy restarts the timer; the previous timer task is aborted first
/// so a restart never clears twice.
pub struct ClipboardExpiry {
    backend: Arc<dyn ClipboardBackend>,
    policy: ClipboardPolicy,
    timer: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for ClipboardExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardExpiry")
            .field("policy", &self.policy)
            .field("armed", &self.is_armed())
            .finish()
    }
}

impl ClipboardExpiry {
    pub fn new(backend: Arc<dyn ClipboardBackend>, policy: ClipboardPolicy) -> Self {
        Self {
            backend,
            policy,
            timer: None,
        }
    }

    pub fn policy(&self) -> ClipboardPolicy {
        self.policy
    }

    /// Put `code` on the clipboard and, depending on the policy, arm the
    /// clear timer for `remaining`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn copy(&mut self, code: &str, remaining: Duration) -> Result<(), ClipboardError> {
        self.backend.set_text(code)?;
        if self.policy == ClipboardPolicy::UntilCodeRotates {
            self.arm(remaining);
        }
        Ok(())
    }

    fn arm(&mut self, after: Duration) {
        self.cancel();
        let backend = Arc::clone(&self.backend);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // Best effort: the clipboard may be held by another process.
            match backend.clear() {
                Ok(()) => tracing::debug!("Cleared copied code from clipboard"),
                Err(e) => tracing::debug!(error = %e, "Could not clear clipboard"),
            }
        }));
        tracing::trace!(after_ms = after.as_millis() as u64, "Clipboard clear armed");
    }

    /// Stop a pending clear without touching the clipboard.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }
}
