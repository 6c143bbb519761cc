//! Synchronization gate: at most one background sync session at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    /// A sync session is running; mutations and new syncs are suspended.
    Active,
}

/// Process-wide synchronization flag.
///
/// Clones share the same flag, so every view of the account list observes
/// the same session.
#[derive(Debug, Clone, Default)]
pub struct SyncGate {
    active: Arc<AtomicBool>,
}

impl SyncGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the Active state. Returns `false` if a session was already
    /// active.
    pub fn try_enter(&self) -> bool {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Return to Idle. Returns `true` if a session was active.
    pub fn leave(&self) -> bool {
        self.active.swap(false, Ordering::AcqRel)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn state(&self) -> GateState {
        if self.is_active() {
            GateState::Active
        } else {
            GateState::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_and_leave() {
        let gate = SyncGate::new();
        assert_eq!(gate.state(), GateState::Idle);

        assert!(gate.try_enter());
        assert!(!gate.try_enter());
        assert_eq!(gate.state(), GateState::Active);

        assert!(gate.leave());
        assert!(!gate.leave());
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_clones_share_state() {
        let gate = SyncGate::new();
        let other = gate.clone();
        assert!(gate.try_enter());
        assert!(other.is_active());
        assert!(!other.try_enter());
        other.leave();
        assert!(!gate.is_active());
    }

    #[test]
    fn test_concurrent_enter_admits_one() {
        let gate = SyncGate::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                std::thread::spawn(move || gate.try_enter())
            })
            .collect();
        let admitted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|entered| *entered)
            .count();
        assert_eq!(admitted, 1);
    }
}
