//! Messages flowing into and out of the coordinator.
//!
//! Inbound, everything arrives on one unbounded inbox
//! ([`CoordinatorMessage`]): storage completions, sync lifecycle events,
//! undo expiry and row messages. Outbound, the presentation layer receives
//! [`CoordinatorEvent`]s.

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::{FailureKind, IntentError, StoreError};
use crate::models::{Account, AccountId, AccountUpdate};
use crate::traits::SyncEvent;

use super::gate::GateState;
use super::list::ListChange;
use super::reorder::ReorderDelta;
use super::undo::PendingRemoval;

/// User-visible banner raised after a recovered failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    ChangesDetectedRedoMove,
    ChangesDetectedRedoDelete,
    ChangesDetectedRedoUndo,
    ChangesDetectedRedoEdit,
    NoInternetChangesRolledBack,
    NoInternetConnection,
    /// A sync session finished unsuccessfully without changes.
    SyncRolledBack,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::ChangesDetectedRedoMove => {
                "Changes were made on another device. Please redo your move."
            }
            Notice::ChangesDetectedRedoDelete => {
                "Changes were made on another device. Please redo your delete."
            }
            Notice::ChangesDetectedRedoUndo => {
                "Changes were made on another device. Please redo your undo."
            }
            Notice::ChangesDetectedRedoEdit => {
                "Changes were made on another device. Please redo your edit."
            }
            Notice::NoInternetChangesRolledBack => {
                "No internet connection. Your changes have been rolled back."
            }
            Notice::NoInternetConnection => "No internet connection. Synchronization failed.",
            Notice::SyncRolledBack => "Synchronization failed. Your changes have been rolled back.",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// A storage-mutating call issued by the coordinator.
#[derive(Debug, Clone)]
pub enum StorageCall {
    Delete { id: AccountId },
    Undo { removal: PendingRemoval },
    Modify { account: Account },
    Reorder(ReorderDelta),
}

impl StorageCall {
    pub fn name(&self) -> &'static str {
        match self {
            StorageCall::Delete { .. } => "delete",
            StorageCall::Undo { .. } => "undo",
            StorageCall::Modify { .. } => "modify",
            StorageCall::Reorder(_) => "reorder",
        }
    }

    /// Notice shown after this call failed with a recoverable error.
    pub fn failure_notice(&self, kind: FailureKind) -> Notice {
        match (self, kind) {
            (_, FailureKind::Network) => Notice::NoInternetChangesRolledBack,
            (StorageCall::Delete { .. }, _) => Notice::ChangesDetectedRedoDelete,
            (StorageCall::Undo { .. }, _) => Notice::ChangesDetectedRedoUndo,
            (StorageCall::Modify { .. }, _) => Notice::ChangesDetectedRedoEdit,
            (StorageCall::Reorder(_), _) => Notice::ChangesDetectedRedoMove,
        }
    }
}

/// Per-row message sent by an account row to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMessage {
    pub account_id: AccountId,
    pub kind: RowMessageKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMessageKind {
    /// The row's delete button was pressed; confirmation is needed.
    DeleteRequested,
    /// The row was tapped to copy its code.
    CopyPerformed,
    /// The row finished its removal animation.
    Removed,
    /// The row's fields were edited.
    Modified(AccountUpdate),
}

/// Everything the coordinator's single sequence processes.
#[derive(Debug, Clone)]
pub enum CoordinatorMessage {
    StorageCompleted {
        call: StorageCall,
        /// Load epoch the call was issued in.
        epoch: u64,
        result: Result<(), StoreError>,
    },
    /// `trigger_remote_sync` returned.
    SyncTriggered(Result<(), StoreError>),
    Sync(SyncEvent),
    UndoExpired { generation: u64 },
    Row(RowMessage),
}

/// Cloneable handle rows use to talk to the coordinator.
#[derive(Debug, Clone)]
pub struct RowSender {
    tx: mpsc::UnboundedSender<CoordinatorMessage>,
}

impl RowSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<CoordinatorMessage>) -> Self {
        Self { tx }
    }

    /// Send a row message. Returns `false` if the coordinator is gone.
    pub fn send(&self, account_id: AccountId, kind: RowMessageKind) -> bool {
        self.tx
            .send(CoordinatorMessage::Row(RowMessage { account_id, kind }))
            .is_ok()
    }
}

/// Which user affordances are currently enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub delete: bool,
    pub reorder: bool,
    pub modify: bool,
    pub undo: bool,
    pub synchronize: bool,
    pub toggle_edit: bool,
}

/// Notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinatorEvent {
    ListChanged(ListChange),
    DeleteConfirmationRequested { account_id: AccountId },
    CodeCopied { account_id: AccountId },
    Modified { account_id: AccountId },
    Removed { account_id: AccountId, index: usize },
    UndoWindowOpened { account_id: AccountId, deadline: Instant },
    UndoWindowClosed,
    EditModeChanged(bool),
    GateChanged(GateState),
    Notice(Notice),
    IntentRejected(IntentError),
    /// Unrecoverable failure; leave the list view showing `detail`.
    Fatal { detail: String },
}
