//! Row view state for one account in the visible list.

use super::account::{Account, AccountId};

/// The presentation-facing state of one row.
///
/// Holds the coordinator's local copy of the account plus the row-level
/// flags the presentation layer needs to animate correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub account: Account,
    in_edit_mode: bool,
    /// When set, the next edit-mode transition snaps to its end state.
    skip_settle_animation: bool,
}

impl AccountView {
    pub fn new(account: Account, in_edit_mode: bool) -> Self {
        Self {
            account,
            in_edit_mode,
            skip_settle_animation: false,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.account.id
    }

    pub fn in_edit_mode(&self) -> bool {
        self.in_edit_mode
    }

    pub fn set_edit_mode(&mut self, in_edit_mode: bool) {
        self.in_edit_mode = in_edit_mode;
    }

    /// Prepare the row for re-insertion after an undo.
    ///
    /// A row restored outside edit mode must not replay its edit-mode
    /// settle animation.
    pub fn show(&mut self, in_edit_mode: bool) {
        self.skip_settle_animation = !in_edit_mode;
        self.in_edit_mode = in_edit_mode;
    }

    pub fn skips_settle_animation(&self) -> bool {
        self.skip_settle_animation
    }

    /// Read and reset the skip flag once the presentation has consumed it.
    pub fn take_skip_settle_animation(&mut self) -> bool {
        std::mem::take(&mut self.skip_settle_animation)
    }
}
