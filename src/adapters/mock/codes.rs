//! Fixed code source for testing.

use std::time::Duration;

use crate::models::Account;
use crate::traits::CodeSource;

/// Returns the same code for every account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedCodeSource {
    code: String,
    remaining: Duration,
}

impl FixedCodeSource {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            remaining: Duration::from_secs(30),
        }
    }

    pub fn with_remaining(mut self, remaining: Duration) -> Self {
        self.remaining = remaining;
        self
    }
}

impl CodeSource for FixedCodeSource {
    fn code(&self, _account: &Account) -> String {
        self.code.clone()
    }

    fn remaining_validity(&self) -> Duration {
        self.remaining
    }
}
