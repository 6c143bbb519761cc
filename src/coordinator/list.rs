//! The ordered, homogeneous list of account rows the user sees.
//!
//! Every structural mutation returns a [`ListChange`] tagged with who made
//! it. Observers (the reorder tracker, the presentation layer) decide from
//! the tag whether to react; nothing toggles a suppression flag.

use crate::models::{AccountId, AccountView};

/// Who performed a structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// Direct user input (drag and drop).
    User,
    /// The coordinator itself (load, undo re-insertion, delete, edits).
    Coordinator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListChangeKind {
    Removed { index: usize, id: AccountId },
    Inserted { index: usize, id: AccountId },
    Updated { index: usize, id: AccountId },
    /// The whole list was rebuilt.
    Reset { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChange {
    pub kind: ListChangeKind,
    pub origin: ChangeOrigin,
}

/// What the list area should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Accounts,
    /// No accounts: show the "add your first account" state instead.
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct VisibleList {
    rows: Vec<AccountView>,
}

impl VisibleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn display_mode(&self) -> DisplayMode {
        if self.rows.is_empty() {
            DisplayMode::Empty
        } else {
            DisplayMode::Accounts
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccountView> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&AccountView> {
        self.rows.get(index)
    }

    pub fn position(&self, id: &AccountId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    pub fn find(&self, id: &AccountId) -> Option<&AccountView> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn ids(&self) -> Vec<AccountId> {
        self.rows.iter().map(|row| row.id().clone()).collect()
    }

    /// Replace every row. Only the coordinator rebuilds the list.
    pub fn reset(&mut self, rows: Vec<AccountView>) -> ListChange {
        self.rows = rows;
        ListChange {
            kind: ListChangeKind::Reset {
                len: self.rows.len(),
            },
            origin: ChangeOrigin::Coordinator,
        }
    }

    pub fn remove(
        &mut self,
        index: usize,
        origin: ChangeOrigin,
    ) -> Option<(AccountView, ListChange)> {
        if index >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        let change = ListChange {
            kind: ListChangeKind::Removed {
                index,
                id: row.id().clone(),
            },
            origin,
        };
        Some((row, change))
    }

    /// Insert a row, clamping `index` to the current length.
    pub fn insert(&mut self, index: usize, row: AccountView, origin: ChangeOrigin) -> ListChange {
        let index = index.min(self.rows.len());
        let id = row.id().clone();
        self.rows.insert(index, row);
        ListChange {
            kind: ListChangeKind::Inserted { index, id },
            origin,
        }
    }

    /// Mutate one row in place.
    pub fn update<F>(&mut self, index: usize, f: F) -> Option<ListChange>
    where
        F: FnOnce(&mut AccountView),
    {
        let row = self.rows.get_mut(index)?;
        f(row);
        Some(ListChange {
            kind: ListChangeKind::Updated {
                index,
                id: row.id().clone(),
            },
            origin: ChangeOrigin::Coordinator,
        })
    }

    pub fn set_edit_mode(&mut self, in_edit_mode: bool) {
        for row in &mut self.rows {
            row.set_edit_mode(in_edit_mode);
        }
    }
}
