//! Error types for the account list.
//!
//! - [`StoreError`]: a storage call was rejected. Classified by
//!   [`FailureKind`] into recoverable (stale conflict, network) and
//!   unclassified failures.
//! - [`IntentError`]: the coordinator refused a user intent before touching
//!   any state (sync running, another save in flight, wrong mode, ...).
//!
//! | Kind | Recovery |
//! |------|----------|
//! | StaleConflict | reload + "redo your ..." notice |
//! | Network | reload + "changes rolled back" notice |
//! | Unclassified | fatal, leave the list view |

mod category;
mod intent;
mod store;

pub use category::FailureKind;
pub use intent::IntentError;
pub use store::StoreError;
