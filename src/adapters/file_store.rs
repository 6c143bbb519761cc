//! JSON file account store adapter.
//!
//! Keeps the account list in a single JSON document, by default
//! `~/.authenticator/accounts.json`. The file also remembers the most
//! recent removal so it can be undone after a restart.
//!
//! There is no remote synchronizer behind this store: it never reports a
//! sync session and `trigger_remote_sync` fails as a network error.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::StoreError;
use crate::models::{Account, AccountId};
use crate::traits::{AccountStore, SyncEvent};

const STORE_DIR: &str = ".authenticator";
const STORE_FILE: &str = "accounts.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    removed: Option<RemovedAccount>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RemovedAccount {
    index: usize,
    account: Account,
}

impl StoreDocument {
    fn position(&self, id: &AccountId) -> Option<usize> {
        self.accounts.iter().position(|a| &a.id == id)
    }

    fn renumber(&mut self) {
        for (position, account) in self.accounts.iter_mut().enumerate() {
            account.position = position as u32;
        }
    }
}

/// File-backed account store.
///
/// Every call reads the document, applies the change and writes it back
/// through a temporary file. A change based on an outdated view of the
/// file (unknown account, wrong revision, out-of-range move) is rejected
/// as a stale conflict.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
    events: broadcast::Sender<SyncEvent>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            events,
        }
    }

    /// Store at `~/.authenticator/accounts.json`.
    pub fn open_default() -> Result<Self, StoreError> {
        let home = dirs::home_dir()
            .ok_or_else(|| StoreError::unclassified("failed to determine home directory"))?;
        Ok(Self::new(home.join(STORE_DIR).join(STORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an account at the end of the list.
    pub fn insert(&self, mut account: Account) -> Result<(), StoreError> {
        self.update(|doc| {
            if doc.position(&account.id).is_some() {
                return Err(StoreError::stale(format!("account {} already exists", account.id)));
            }
            account.position = doc.accounts.len() as u32;
            doc.accounts.push(account);
            Ok(())
        })
    }

    fn read(&self) -> Result<StoreDocument, StoreError> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        let mut doc: StoreDocument = serde_json::from_reader(reader)?;
        doc.accounts.sort_by_key(|a| a.position);
        Ok(doc)
    }

    fn write(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer_pretty(&mut writer, doc)?;
            std::io::Write::flush(&mut writer)?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read-modify-write under the store lock.
    fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut StoreDocument) -> Result<(), StoreError>,
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::unclassified("account store lock poisoned"))?;
        let mut doc = self.read()?;
        f(&mut doc)?;
        doc.renumber();
        self.write(&doc)
    }
}

#[async_trait]
impl AccountStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Account>, StoreError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StoreError::unclassified("account store lock poisoned"))?;
        let doc = self.read()?;
        debug!(path = %self.path.display(), accounts = doc.accounts.len(), "Read account store");
        Ok(doc.accounts)
    }

    async fn remove(&self, id: &AccountId) -> Result<(), StoreError> {
        self.update(|doc| {
            let index = doc
                .position(id)
                .ok_or_else(|| StoreError::stale(format!("account {id} no longer exists")))?;
            let account = doc.accounts.remove(index);
            doc.removed = Some(RemovedAccount { index, account });
            Ok(())
        })
    }

    async fn undo_remove(&self) -> Result<(), StoreError> {
        self.update(|doc| {
            let RemovedAccount { index, account } = doc
                .removed
                .take()
                .ok_or_else(|| StoreError::stale("no removed account to restore"))?;
            if doc.position(&account.id).is_some() {
                return Err(StoreError::stale(format!(
                    "account {} was restored elsewhere",
                    account.id
                )));
            }
            let index = index.min(doc.accounts.len());
            doc.accounts.insert(index, account);
            Ok(())
        })
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        self.update(|doc| {
            let index = doc.position(&account.id).ok_or_else(|| {
                StoreError::stale(format!("account {} no longer exists", account.id))
            })?;
            let stored = &doc.accounts[index];
            if account.revision != stored.revision + 1 {
                return Err(StoreError::stale(format!(
                    "account {} is at revision {}, edit was based on {}",
                    account.id,
                    stored.revision,
                    account.revision.saturating_sub(1)
                )));
            }
            doc.accounts[index] = account.clone();
            Ok(())
        })
    }

    async fn reorder(&self, from: usize, to: usize) -> Result<(), StoreError> {
        self.update(|doc| {
            let len = doc.accounts.len();
            if from >= len || to >= len {
                return Err(StoreError::stale(format!(
                    "cannot move {from} to {to} in a list of {len}"
                )));
            }
            let account = doc.accounts.remove(from);
            doc.accounts.insert(to, account);
            Ok(())
        })
    }

    async fn trigger_remote_sync(&self) -> Result<(), StoreError> {
        Err(StoreError::network("no remote synchronizer configured"))
    }

    fn is_sync_in_flight(&self) -> bool {
        false
    }

    fn has_remote_synchronizer(&self) -> bool {
        false
    }

    fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::models::AccountUpdate;
    use tempfile::TempDir;

    fn create_test_store(temp_dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(temp_dir.path().join("nested").join("accounts.json"))
    }

    fn seed(store: &JsonFileStore, ids: &[&str]) {
        for id in ids {
            store
                .insert(Account::with_id(*id, id.to_uppercase(), "alice", vec![7; 20]))
                .unwrap();
        }
    }

    async fn ids(store: &JsonFileStore) -> Vec<String> {
        store
            .load_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id.as_str().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_creates_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        seed(&store, &["a"]);
        assert!(store.path().exists());
        assert_eq!(ids(&store).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_remove_and_undo_restores_position() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        seed(&store, &["a", "b", "c"]);

        store.remove(&AccountId::from("b")).await.unwrap();
        assert_eq!(ids(&store).await, vec!["a", "c"]);

        store.undo_remove().await.unwrap();
        assert_eq!(ids(&store).await, vec!["a", "b", "c"]);

        let err = store.undo_remove().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::StaleConflict);
    }

    #[tokio::test]
    async fn test_remove_unknown_is_stale() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        seed(&store, &["a"]);
        let err = store.remove(&AccountId::from("zz")).await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.kind(), FailureKind::StaleConflict);
    }

    #[tokio::test]
    async fn test_reorder_renumbers_positions() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        seed(&store, &["a", "b", "c"]);

        store.reorder(0, 2).await.unwrap();
        let accounts = store.load_all().await.unwrap();
        let order: Vec<_> = accounts.iter().map(|a| (a.id.as_str(), a.position)).collect();
        assert_eq!(order, vec![("b", 0), ("c", 1), ("a", 2)]);

        let err = store.reorder(0, 3).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::StaleConflict);
    }

    #[tokio::test]
    async fn test_save_checks_revision() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        seed(&store, &["a"]);

        let mut account = store.load_all().await.unwrap().remove(0);
        let mut concurrent = account.clone();
        assert!(account.apply(&AccountUpdate::service("Renamed")));
        store.save(&account).await.unwrap();

        // Edit based on the revision before the first save.
        assert!(concurrent.apply(&AccountUpdate::service("Other")));
        let err = store.save(&concurrent).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::StaleConflict);

        let stored = store.load_all().await.unwrap().remove(0);
        assert_eq!(stored.service, "Renamed");
        assert_eq!(stored.revision, 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_unclassified() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not valid json").unwrap();

        let err = store.load_all().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Unclassified);
    }

    #[tokio::test]
    async fn test_no_remote_synchronizer() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_test_store(&temp_dir);
        assert!(!store.has_remote_synchronizer());
        assert!(!store.is_sync_in_flight());
        let err = store.trigger_remote_sync().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Network);
    }
}
