//! Authenticator account list.
//!
//! Coordinates optimistic edits of a one-time-password account list
//! (delete with undo, reorder, rename, copy) against a store that may be
//! synchronizing with other devices in the background.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod coordinator;
pub mod error;
pub mod models;
pub mod startup;
pub mod traits;
