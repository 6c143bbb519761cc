//! One-time code source trait abstraction.

use std::time::Duration;

use crate::models::Account;

/// Produces the current one-time code of an account.
///
/// The coordinator treats the code as an opaque string. It only needs to
/// know how long the current code stays valid so a copied code is cleared
/// when it rotates.
pub trait CodeSource: Send + Sync {
    fn code(&self, account: &Account) -> String;

    /// Time until the current code rotates.
    fn remaining_validity(&self) -> Duration;
}
