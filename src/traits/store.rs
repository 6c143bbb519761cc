//! Account store trait abstraction.
//!
//! The store owns the authoritative account list (local cache plus an
//! optional remote synchronizer). The coordinator only observes the
//! contract below: success, stale conflict, network failure, or anything
//! else.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::models::{Account, AccountId};

/// Outcome of one background synchronization session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncResult {
    /// The local cache was changed by the session and must be reloaded.
    pub has_changes: bool,
    pub successful: bool,
}

/// Lifecycle events of background synchronization sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    Started,
    Completed(SyncResult),
}

/// Trait for the persisted account collection.
///
/// Implementations include the JSON file cache used by the binary and an
/// in-memory store for tests.
///
/// # Example
///
/// ```ignore
/// use authenticator::traits::AccountStore;
///
/// async fn rename_first<S: AccountStore>(store: &S) -> Result<(), StoreError> {
///     let mut accounts = store.load_all().await?;
///     if let Some(first) = accounts.first_mut() {
///         first.apply(&AccountUpdate::service("Renamed"));
///         store.save(first).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch the full ordered account set.
    async fn load_all(&self) -> Result<Vec<Account>, StoreError>;

    /// Remove an account. The store keeps it recoverable through
    /// [`undo_remove`](AccountStore::undo_remove) until the next removal.
    async fn remove(&self, id: &AccountId) -> Result<(), StoreError>;

    /// Restore the most recently removed account at its old position.
    async fn undo_remove(&self) -> Result<(), StoreError>;

    /// Persist edited fields of an existing account.
    async fn save(&self, account: &Account) -> Result<(), StoreError>;

    /// Move the account at `from` to `to`.
    async fn reorder(&self, from: usize, to: usize) -> Result<(), StoreError>;

    /// Start a background synchronization with the remote store.
    ///
    /// Returns once the session has been started; completion is reported
    /// through [`SyncEvent::Completed`].
    async fn trigger_remote_sync(&self) -> Result<(), StoreError>;

    fn is_sync_in_flight(&self) -> bool;

    fn has_remote_synchronizer(&self) -> bool;

    /// Subscribe to synchronization lifecycle events.
    fn subscribe(&self) -> broadcast::Receiver<SyncEvent>;
}
