//! Mock fixtures for integration tests.
//!
//! Re-exports the mock adapters from `authenticator::adapters::mock` and
//! provides preconfigured accounts and sync outcomes.

pub use authenticator::adapters::mock::{
    FixedCodeSource, InMemoryAccountStore, RecordingClipboard, StoreCall,
};
pub use authenticator::traits::{SyncEvent, SyncResult};

use authenticator::models::Account;

/// Code every test account yields.
pub const TEST_CODE: &str = "123456";

/// Accounts whose ids are the given names and whose service is the
/// upper-cased name.
pub fn accounts(ids: &[&str]) -> Vec<Account> {
    ids.iter()
        .map(|id| {
            Account::with_id(
                *id,
                id.to_uppercase(),
                format!("{id}@example.com"),
                vec![0x42; 20],
            )
        })
        .collect()
}

pub fn store_with(ids: &[&str]) -> InMemoryAccountStore {
    InMemoryAccountStore::with_accounts(accounts(ids))
}

/// Store with a remote synchronizer attached.
pub fn synced_store_with(ids: &[&str]) -> InMemoryAccountStore {
    store_with(ids).with_remote_synchronizer()
}

pub fn sync_ok() -> SyncResult {
    SyncResult {
        has_changes: false,
        successful: true,
    }
}

pub fn sync_with_changes() -> SyncResult {
    SyncResult {
        has_changes: true,
        successful: true,
    }
}

/// Session that ended unsuccessfully without touching the cache.
pub fn sync_soft_failure() -> SyncResult {
    SyncResult {
        has_changes: false,
        successful: false,
    }
}
