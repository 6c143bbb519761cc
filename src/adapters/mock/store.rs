//! In-memory account store for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::models::{Account, AccountId};
use crate::traits::{AccountStore, SyncEvent, SyncResult};

/// A call the coordinator made, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    LoadAll,
    Remove(AccountId),
    UndoRemove,
    Save(AccountId),
    Reorder { from: usize, to: usize },
    TriggerRemoteSync,
}

impl StoreCall {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StoreCall::LoadAll)
    }
}

/// In-memory account store.
///
/// Records every call and can be told to fail the next mutating call with
/// a given error. With a remote synchronizer attached,
/// `trigger_remote_sync` publishes `Started` followed by `Completed` with
/// the configured outcome.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryAccountStore::with_accounts(accounts).with_remote_synchronizer();
/// store.fail_next(StoreError::stale("edited elsewhere"));
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<Mutex<Vec<Account>>>,
    removed: Arc<Mutex<Option<(usize, Account)>>>,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    /// Errors for the next mutating calls, in order
    failures: Arc<Mutex<VecDeque<StoreError>>>,
    load_failure: Arc<Mutex<Option<StoreError>>>,
    trigger_failure: Arc<Mutex<Option<StoreError>>>,
    sync_outcome: Arc<Mutex<Option<SyncResult>>>,
    sync_in_flight: Arc<AtomicBool>,
    remote: bool,
    events: broadcast::Sender<SyncEvent>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::with_accounts(Vec::new())
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
            removed: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            load_failure: Arc::new(Mutex::new(None)),
            trigger_failure: Arc::new(Mutex::new(None)),
            sync_outcome: Arc::new(Mutex::new(Some(SyncResult {
                has_changes: false,
                successful: true,
            }))),
            sync_in_flight: Arc::new(AtomicBool::new(false)),
            remote: false,
            events,
        }
    }

    /// Attach a (simulated) remote synchronizer.
    pub fn with_remote_synchronizer(mut self) -> Self {
        self.remote = true;
        self
    }

    /// Fail the next mutating call with `err`.
    pub fn fail_next(&self, err: StoreError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn set_load_failure(&self, err: Option<StoreError>) {
        *self.load_failure.lock().unwrap() = err;
    }

    pub fn set_trigger_failure(&self, err: Option<StoreError>) {
        *self.trigger_failure.lock().unwrap() = err;
    }

    /// Outcome published after a triggered sync. `None` publishes only
    /// `Started`, leaving the session open.
    pub fn set_sync_outcome(&self, outcome: Option<SyncResult>) {
        *self.sync_outcome.lock().unwrap() = outcome;
    }

    pub fn set_sync_in_flight(&self, in_flight: bool) {
        self.sync_in_flight.store(in_flight, Ordering::SeqCst);
    }

    /// Publish a sync event as if a session started or ended elsewhere.
    pub fn emit(&self, event: SyncEvent) -> usize {
        match event {
            SyncEvent::Started => self.set_sync_in_flight(true),
            SyncEvent::Completed(_) => self.set_sync_in_flight(false),
        }
        self.events.send(event).unwrap_or(0)
    }

    /// Snapshot of the stored accounts.
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }

    pub fn ids(&self) -> Vec<String> {
        self.accounts()
            .into_iter()
            .map(|a| a.id.as_str().to_string())
            .collect()
    }

    /// Replace the stored list, e.g. to simulate changes from another device.
    pub fn set_accounts(&self, accounts: Vec<Account>) {
        *self.accounts.lock().unwrap() = accounts;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_calls(&self) -> Vec<StoreCall> {
        self.calls().into_iter().filter(StoreCall::is_mutation).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        let is_mutation = call.is_mutation();
        self.calls.lock().unwrap().push(call);
        if is_mutation {
            if let Some(err) = self.failures.lock().unwrap().pop_front() {
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn load_all(&self) -> Result<Vec<Account>, StoreError> {
        self.record(StoreCall::LoadAll)?;
        if let Some(err) = self.load_failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.accounts())
    }

    async fn remove(&self, id: &AccountId) -> Result<(), StoreError> {
        self.record(StoreCall::Remove(id.clone()))?;
        let mut accounts = self.accounts.lock().unwrap();
        let index = accounts
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| StoreError::stale(format!("account {id} no longer exists")))?;
        let account = accounts.remove(index);
        *self.removed.lock().unwrap() = Some((index, account));
        Ok(())
    }

    async fn undo_remove(&self) -> Result<(), StoreError> {
        self.record(StoreCall::UndoRemove)?;
        let (index, account) = self
            .removed
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| StoreError::stale("no removed account to restore"))?;
        let mut accounts = self.accounts.lock().unwrap();
        let index = index.min(accounts.len());
        accounts.insert(index, account);
        Ok(())
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.record(StoreCall::Save(account.id.clone()))?;
        let mut accounts = self.accounts.lock().unwrap();
        let stored = accounts
            .iter_mut()
            .find(|a| a.id == account.id)
            .ok_or_else(|| StoreError::stale(format!("account {} no longer exists", account.id)))?;
        *stored = account.clone();
        Ok(())
    }

    async fn reorder(&self, from: usize, to: usize) -> Result<(), StoreError> {
        self.record(StoreCall::Reorder { from, to })?;
        let mut accounts = self.accounts.lock().unwrap();
        let len = accounts.len();
        if from >= len || to >= len {
            return Err(StoreError::stale(format!("cannot move {from} to {to} in {len}")));
        }
        let account = accounts.remove(from);
        accounts.insert(to, account);
        Ok(())
    }

    async fn trigger_remote_sync(&self) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(StoreCall::TriggerRemoteSync);
        if let Some(err) = self.trigger_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.emit(SyncEvent::Started);
        if let Some(outcome) = *self.sync_outcome.lock().unwrap() {
            self.emit(SyncEvent::Completed(outcome));
        }
        Ok(())
    }

    fn is_sync_in_flight(&self) -> bool {
        self.sync_in_flight.load(Ordering::SeqCst)
    }

    fn has_remote_synchronizer(&self) -> bool {
        self.remote
    }

    fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }
}
