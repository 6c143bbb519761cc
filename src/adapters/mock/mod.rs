//! Mock implementations for testing.
//!
//! This module provides mock implementations of all trait abstractions,
//! so the coordinator can be driven without a file system, a display
//! server or a wall clock.
//!
//! # Available Mocks
//!
//! - [`InMemoryAccountStore`] - Account store with call recording and failure injection
//! - [`RecordingClipboard`] - Clipboard that remembers its contents
//! - [`FixedCodeSource`] - Constant one-time code

pub mod clipboard;
pub mod codes;
pub mod store;

pub use clipboard::RecordingClipboard;
pub use codes::FixedCodeSource;
pub use store::{InMemoryAccountStore, StoreCall};
