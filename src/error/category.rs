//! Failure classification for storage outcomes.
//!
//! The coordinator never inspects the concrete error; it only asks which
//! kind of failure happened and derives its recovery strategy from that.

use std::fmt;

/// High-level classification of a rejected storage call.
///
/// The classification decides between local recovery (reload and notify)
/// and the fatal path (leave the list view carrying the error detail).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The local copy diverged from the authoritative version.
    /// Recovered by reloading; never retried, a retry would conflict again.
    StaleConflict,

    /// Transient connectivity loss.
    /// Recovered by reloading; the user redoes the action once online.
    Network,

    /// Anything else. Assumed to be a programming or environment defect.
    Unclassified,
}

impl FailureKind {
    /// Returns true if failures of this kind are recovered locally via
    /// rollback instead of the fatal path.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FailureKind::StaleConflict | FailureKind::Network)
    }

    /// Returns a short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::StaleConflict => "stale_conflict",
            FailureKind::Network => "network",
            FailureKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
