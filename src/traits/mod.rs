//! Trait abstractions for the coordinator's collaborators.
//!
//! Every side effect the coordinator performs goes through one of these
//! traits, so the whole state machine runs against in-memory doubles in
//! tests.
//!
//! # Traits
//!
//! - [`AccountStore`] - persisted account list and background sync
//! - [`ClipboardBackend`] - system clipboard writes and clears
//! - [`CodeSource`] - current one-time code and its remaining validity

pub mod clipboard;
pub mod codes;
pub mod store;

pub use clipboard::{ClipboardBackend, ClipboardError};
pub use codes::CodeSource;
pub use store::{AccountStore, SyncEvent, SyncResult};
