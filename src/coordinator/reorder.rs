//! Derives a single move from the remove/insert pair of a user drag.

use super::list::{ChangeOrigin, ListChange, ListChangeKind};

/// One user-initiated move, consumed by exactly one persistence call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderDelta {
    pub from: usize,
    pub to: usize,
}

impl ReorderDelta {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Default)]
pub struct ReorderTracker {
    from: Option<usize>,
}

impl ReorderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one structural change. Returns the completed move when `change`
    /// is the insert half of a user drag.
    ///
    /// Coordinator-originated changes are ignored entirely.
    pub fn observe(&mut self, change: &ListChange) -> Option<ReorderDelta> {
        if change.origin != ChangeOrigin::User {
            return None;
        }
        match change.kind {
            ListChangeKind::Removed { index, .. } => {
                self.from = Some(index);
                None
            }
            ListChangeKind::Inserted { index, .. } => self
                .from
                .take()
                .map(|from| ReorderDelta { from, to: index }),
            ListChangeKind::Updated { .. } | ListChangeKind::Reset { .. } => None,
        }
    }

    /// Drop a half-observed drag.
    pub fn reset(&mut self) {
        self.from = None;
    }

    pub fn has_pending_remove(&self) -> bool {
        self.from.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountId;

    fn removed(index: usize, origin: ChangeOrigin) -> ListChange {
        ListChange {
            kind: ListChangeKind::Removed {
                index,
                id: AccountId::from("x"),
            },
            origin,
        }
    }

    fn inserted(index: usize, origin: ChangeOrigin) -> ListChange {
        ListChange {
            kind: ListChangeKind::Inserted {
                index,
                id: AccountId::from("x"),
            },
            origin,
        }
    }

    #[test]
    fn test_user_drag_yields_delta() {
        let mut tracker = ReorderTracker::new();
        assert!(tracker.observe(&removed(2, ChangeOrigin::User)).is_none());
        assert!(tracker.has_pending_remove());
        assert_eq!(
            tracker.observe(&inserted(0, ChangeOrigin::User)),
            Some(ReorderDelta { from: 2, to: 0 })
        );
        assert!(!tracker.has_pending_remove());
    }

    #[test]
    fn test_coordinator_changes_are_ignored() {
        let mut tracker = ReorderTracker::new();
        assert!(tracker.observe(&removed(1, ChangeOrigin::Coordinator)).is_none());
        assert!(tracker.observe(&inserted(1, ChangeOrigin::Coordinator)).is_none());
        assert!(!tracker.has_pending_remove());
    }

    #[test]
    fn test_coordinator_insert_does_not_complete_user_drag() {
        let mut tracker = ReorderTracker::new();
        tracker.observe(&removed(3, ChangeOrigin::User));
        assert!(tracker.observe(&inserted(0, ChangeOrigin::Coordinator)).is_none());
        assert_eq!(
            tracker.observe(&inserted(1, ChangeOrigin::User)),
            Some(ReorderDelta { from: 3, to: 1 })
        );
    }

    #[test]
    fn test_insert_without_remove_is_not_a_drag() {
        let mut tracker = ReorderTracker::new();
        assert!(tracker.observe(&inserted(0, ChangeOrigin::User)).is_none());
    }

    #[test]
    fn test_reset_drops_half_drag() {
        let mut tracker = ReorderTracker::new();
        tracker.observe(&removed(1, ChangeOrigin::User));
        tracker.reset();
        assert!(tracker.observe(&inserted(0, ChangeOrigin::User)).is_none());
    }

    #[test]
    fn test_noop_delta() {
        assert!(ReorderDelta { from: 1, to: 1 }.is_noop());
        assert!(!ReorderDelta { from: 1, to: 2 }.is_noop());
    }
}
