//! Rejections of user intents by the coordinator.
//!
//! These are not failures of the store. They mean the coordinator refused
//! to start the action at all, leaving every piece of state untouched.

use thiserror::Error;

use crate::models::AccountId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntentError {
    /// A synchronization session is active; mutations are suspended.
    #[error("synchronization in progress")]
    SyncInProgress,

    /// Another storage-mutating call has not completed yet.
    #[error("another change is still being saved")]
    Busy,

    /// The account is not in the visible list (unknown or mid-removal).
    #[error("account {0} is not visible")]
    NotVisible(AccountId),

    #[error("nothing to undo")]
    NothingToUndo,

    /// Reorder and modify are only legal in edit mode.
    #[error("not in edit mode")]
    NotInEditMode,

    /// Copy is only legal outside edit mode.
    #[error("leave edit mode to copy codes")]
    InEditMode,

    #[error("index {index} out of range for {len} accounts")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cloud synchronization is not available")]
    NoRemoteSynchronizer,

    #[error("no delete is awaiting confirmation")]
    NoPendingConfirmation,

    /// A reload would close the undo window of a pending removal.
    #[error("undo or let the pending delete expire first")]
    UndoPending,

    /// Writing to the system clipboard failed.
    #[error("copy failed: {0}")]
    Clipboard(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_error_display() {
        assert_eq!(IntentError::Busy.to_string(), "another change is still being saved");
        assert_eq!(
            IntentError::NotVisible(AccountId::from("abc")).to_string(),
            "account abc is not visible"
        );
        assert_eq!(
            IntentError::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "index 7 out of range for 3 accounts"
        );
    }
}
