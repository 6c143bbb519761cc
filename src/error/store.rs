//! Errors reported by an [`AccountStore`](crate::traits::AccountStore).

use thiserror::Error;

use super::category::FailureKind;

/// Error returned by every storage operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic-concurrency violation: the store's version of the data no
    /// longer matches what the caller based its change on.
    #[error("stale data: {detail}")]
    StaleConflict { detail: String },

    /// Connectivity loss while talking to the store or its synchronizer.
    #[error("network failure: {message}")]
    Network { message: String },

    /// Any other failure (I/O, corrupt cache, bugs).
    #[error("{message}")]
    Unclassified { message: String },
}

impl StoreError {
    pub fn stale(detail: impl Into<String>) -> Self {
        StoreError::StaleConflict {
            detail: detail.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        StoreError::Network {
            message: message.into(),
        }
    }

    pub fn unclassified(message: impl Into<String>) -> Self {
        StoreError::Unclassified {
            message: message.into(),
        }
    }

    /// Classify this error for recovery decisions.
    pub fn kind(&self) -> FailureKind {
        match self {
            StoreError::StaleConflict { .. } => FailureKind::StaleConflict,
            StoreError::Network { .. } => FailureKind::Network,
            StoreError::Unclassified { .. } => FailureKind::Unclassified,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind().is_recoverable()
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::unclassified(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::unclassified(format!("corrupt account cache: {}", err))
    }
}
