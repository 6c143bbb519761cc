//! Account list coordination.
//!
//! [`ListCoordinator`] owns the visible account list and mediates between
//! user intents and the account store. The pieces it is built from are
//! usable on their own:
//!
//! - [`undo`]: the single-slot buffer behind "undo delete"
//! - [`reorder`]: turns a user drag (remove + insert) into one move
//! - [`gate`]: the shared "sync in progress" flag
//! - [`clipboard_timer`]: clears a copied code once it rotates
//! - [`edit_mode`]: which row affordances edit mode enables
//! - [`list`]: the visible list and its change notifications
//! - [`messages`]: inbox messages, row messages and outbound events

pub mod clipboard_timer;
pub mod edit_mode;
pub mod gate;
pub mod list;
mod list_coordinator;
pub mod messages;
pub mod reorder;
pub mod undo;

pub use clipboard_timer::{ClipboardExpiry, ClipboardPolicy};
pub use edit_mode::EditMode;
pub use gate::{GateState, SyncGate};
pub use list::{ChangeOrigin, DisplayMode, ListChange, ListChangeKind, VisibleList};
pub use list_coordinator::ListCoordinator;
pub use messages::{
    Affordances, CoordinatorEvent, CoordinatorMessage, Notice, RowMessage, RowMessageKind,
    RowSender, StorageCall,
};
pub use reorder::{ReorderDelta, ReorderTracker};
pub use undo::{PendingRemoval, UndoBuffer, DEFAULT_UNDO_WINDOW};
