//! Single-slot undo buffer for removed accounts.
//!
//! ```text
//! Empty ──delete──▶ Pending(deadline) ──expire / undo / reload──▶ Empty
//!                     │        ▲
//!                     └delete──┘  (old entry dropped, removal stays final)
//! ```

use std::time::Duration;

use tokio::time::Instant;

use crate::models::AccountView;

/// Default time the undo affordance stays available.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

/// A removed row that can still be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRemoval {
    pub view: AccountView,
    /// Index the row had before it was removed.
    pub index: usize,
    pub deadline: Instant,
}

#[derive(Debug)]
pub struct UndoBuffer {
    window: Duration,
    pending: Option<PendingRemoval>,
}

impl Default for UndoBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_WINDOW)
    }
}

impl UndoBuffer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Open a new undo window, restarting the deadline.
    ///
    /// Returns the entry it superseded, if any. That entry is no longer
    /// recoverable.
    pub fn open(
        &mut self,
        view: AccountView,
        index: usize,
        now: Instant,
    ) -> Option<PendingRemoval> {
        self.pending.replace(PendingRemoval {
            view,
            index,
            deadline: now + self.window,
        })
    }

    /// Take the pending entry for an undo attempt.
    pub fn take(&mut self) -> Option<PendingRemoval> {
        self.pending.take()
    }

    /// Discard the pending entry if its deadline has passed.
    pub fn expire(&mut self, now: Instant) -> Option<PendingRemoval> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => self.pending.take(),
            _ => None,
        }
    }

    pub fn clear(&mut self) -> Option<PendingRemoval> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&PendingRemoval> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    fn row(id: &str) -> AccountView {
        AccountView::new(Account::with_id(id, "svc", "user", vec![]), false)
    }

    #[test]
    fn test_default_window_is_five_seconds() {
        assert_eq!(UndoBuffer::default().window(), Duration::from_secs(5));
    }

    #[test]
    fn test_open_sets_deadline() {
        let mut buffer = UndoBuffer::new(Duration::from_secs(5));
        let now = Instant::now();
        assert!(buffer.open(row("a"), 1, now).is_none());
        assert_eq!(buffer.deadline(), Some(now + Duration::from_secs(5)));
        assert_eq!(buffer.pending().unwrap().index, 1);
    }

    #[test]
    fn test_second_open_supersedes_first() {
        let mut buffer = UndoBuffer::default();
        let now = Instant::now();
        buffer.open(row("a"), 0, now);
        let superseded = buffer.open(row("b"), 0, now + Duration::from_secs(1)).unwrap();
        assert_eq!(superseded.view.id().as_str(), "a");
        assert_eq!(buffer.pending().unwrap().view.id().as_str(), "b");
        assert_eq!(
            buffer.deadline(),
            Some(now + Duration::from_secs(1) + DEFAULT_UNDO_WINDOW)
        );
    }

    #[test]
    fn test_expire_respects_deadline() {
        let mut buffer = UndoBuffer::new(Duration::from_secs(5));
        let now = Instant::now();
        buffer.open(row("a"), 0, now);

        assert!(buffer.expire(now + Duration::from_secs(4)).is_none());
        assert!(buffer.is_pending());

        assert!(buffer.expire(now + Duration::from_secs(5)).is_some());
        assert!(!buffer.is_pending());
    }

    #[test]
    fn test_take_empties_buffer() {
        let mut buffer = UndoBuffer::default();
        buffer.open(row("a"), 2, Instant::now());
        let taken = buffer.take().unwrap();
        assert_eq!(taken.index, 2);
        assert!(buffer.take().is_none());
    }
}
