//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`JsonFileStore`] - Account list in a JSON file
//! - [`ArboardClipboard`] - System clipboard via arboard
//! - [`TotpCodeSource`] - RFC 6238 codes from the account secret
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles for all traits:
//! - [`mock::InMemoryAccountStore`] - Scriptable in-memory store
//! - [`mock::RecordingClipboard`] - In-memory clipboard
//! - [`mock::FixedCodeSource`] - Constant codes

pub mod arboard_clipboard;
pub mod file_store;
pub mod mock;
pub mod totp;

pub use arboard_clipboard::ArboardClipboard;
pub use file_store::JsonFileStore;
pub use mock::{FixedCodeSource, InMemoryAccountStore, RecordingClipboard};
pub use totp::{TotpAlgorithm, TotpCodeSource};
