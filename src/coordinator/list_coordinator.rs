//! The list mutation & synchronization coordinator.
//!
//! Applies user intents optimistically to the visible list, issues the
//! matching storage call, and reconciles once the store answers. Runs on a
//! single cooperative sequence: intents are `&mut self` methods, and every
//! asynchronous outcome comes back through the inbox and is applied by
//! [`ListCoordinator::handle_message`].

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, trace, warn};

use crate::error::{FailureKind, IntentError, StoreError};
use crate::models::{AccountId, AccountUpdate, AccountView};
use crate::startup::SessionConfig;
use crate::traits::{AccountStore, ClipboardBackend, CodeSource, SyncEvent, SyncResult};

use super::clipboard_timer::ClipboardExpiry;
use super::edit_mode::EditMode;
use super::gate::{GateState, SyncGate};
use super::list::{ChangeOrigin, VisibleList};
use super::messages::{
    Affordances, CoordinatorEvent, CoordinatorMessage, Notice, RowMessage, RowMessageKind,
    RowSender, StorageCall,
};
use super::reorder::{ReorderDelta, ReorderTracker};
use super::undo::{PendingRemoval, UndoBuffer};

pub struct ListCoordinator {
    store: Arc<dyn AccountStore>,
    codes: Arc<dyn CodeSource>,
    clipboard: ClipboardExpiry,
    config: SessionConfig,

    list: VisibleList,
    undo: UndoBuffer,
    tracker: ReorderTracker,
    gate: SyncGate,
    edit_mode: EditMode,

    /// A storage-mutating call is outstanding.
    mutation_in_flight: bool,
    /// `trigger_remote_sync` was called and has not returned yet.
    sync_requested: bool,
    awaiting_confirmation: Option<AccountId>,
    /// Bumped on every load; completions from older epochs skip local effects.
    epoch: u64,
    undo_generation: u64,
    undo_timer: Option<JoinHandle<()>>,
    sync_forwarder: Option<JoinHandle<()>>,

    inbox_tx: mpsc::UnboundedSender<CoordinatorMessage>,
    inbox_rx: mpsc::UnboundedReceiver<CoordinatorMessage>,
    events: mpsc::UnboundedSender<CoordinatorEvent>,
}

impl ListCoordinator {
    /// Create a coordinator and the event stream for the presentation layer.
    ///
    /// The list is empty until [`start`](Self::start) or
    /// [`load`](Self::load) runs.
    pub fn new(
        store: Arc<dyn AccountStore>,
        codes: Arc<dyn CodeSource>,
        clipboard: Arc<dyn ClipboardBackend>,
        config: SessionConfig,
    ) -> (Self, mpsc::UnboundedReceiver<CoordinatorEvent>) {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (events, events_rx) = mpsc::unbounded_channel();

        let coordinator = Self {
            store,
            codes,
            clipboard: ClipboardExpiry::new(clipboard, config.clipboard_policy),
            undo: UndoBuffer::new(config.undo_window),
            config,
            list: VisibleList::new(),
            tracker: ReorderTracker::new(),
            gate: SyncGate::new(),
            edit_mode: EditMode::default(),
            mutation_in_flight: false,
            sync_requested: false,
            awaiting_confirmation: None,
            epoch: 0,
            undo_generation: 0,
            undo_timer: None,
            sync_forwarder: None,
            inbox_tx,
            inbox_rx,
            events,
        };
        (coordinator, events_rx)
    }

    /// Share an existing gate instead of the coordinator's own.
    pub fn with_gate(mut self, gate: SyncGate) -> Self {
        self.gate = gate;
        self
    }

    // ========== Queries ==========

    pub fn visible(&self) -> &VisibleList {
        &self.list
    }

    pub fn pending_removal(&self) -> Option<&PendingRemoval> {
        self.undo.pending()
    }

    pub fn undo_deadline(&self) -> Option<Instant> {
        self.undo.deadline()
    }

    pub fn gate(&self) -> SyncGate {
        self.gate.clone()
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn in_edit_mode(&self) -> bool {
        self.edit_mode.is_active()
    }

    pub fn is_busy(&self) -> bool {
        self.mutation_in_flight
    }

    /// A sync trigger was issued and the store has not answered yet.
    pub fn is_sync_requested(&self) -> bool {
        self.sync_requested
    }

    pub fn awaiting_confirmation(&self) -> Option<&AccountId> {
        self.awaiting_confirmation.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn row_sender(&self) -> RowSender {
        RowSender::new(self.inbox_tx.clone())
    }

    pub fn sync_available(&self) -> bool {
        self.config.cloud_sync && self.store.has_remote_synchronizer()
    }

    pub fn affordances(&self) -> Affordances {
        let gate_open = !self.gate.is_active();
        let open = gate_open && !self.mutation_in_flight;
        Affordances {
            delete: open && !self.list.is_empty(),
            reorder: open && self.edit_mode.allows_reorder(),
            modify: open && self.edit_mode.allows_modify(),
            undo: open && self.undo.is_pending(),
            synchronize: open && self.sync_available(),
            toggle_edit: gate_open,
        }
    }

    // ========== Lifecycle ==========

    /// Initial load for this session.
    ///
    /// Subscribes to sync events when cloud sync is usable, loads the list,
    /// runs the launch-time sync on the session's first load, and enters
    /// the gate if the store is already synchronizing.
    ///
    /// A session the store is already running is always listened to, even
    /// with cloud sync off, so its completion can close the gate.
    pub async fn start(&mut self) -> Result<(), StoreError> {
        if self.sync_available() {
            self.ensure_sync_forwarder();
        }

        self.load().await?;

        if self.config.syncs_on_launch() && self.sync_available() {
            if let Err(e) = self.trigger_sync() {
                warn!(error = %e, "Launch synchronization not started");
            }
        }
        self.config.first_load = false;

        if self.store.is_sync_in_flight() {
            self.ensure_sync_forwarder();
            // Subscribed before re-checking, so a completion in between is not lost.
            if self.store.is_sync_in_flight() {
                self.enter_gate();
            }
        }
        Ok(())
    }

    /// Rebuild the visible list from the store.
    ///
    /// Discards the local effects of everything pending: the undo window,
    /// a half-observed drag, a delete awaiting confirmation.
    pub async fn load(&mut self) -> Result<(), StoreError> {
        let accounts = self.store.load_all().await?;
        let in_edit_mode = self.edit_mode.is_active();
        let rows: Vec<AccountView> = accounts
            .into_iter()
            .map(|account| AccountView::new(account, in_edit_mode))
            .collect();

        self.epoch += 1;
        let change = self.list.reset(rows);
        self.tracker.reset();
        self.cancel_undo_timer();
        if self.undo.clear().is_some() {
            self.emit(CoordinatorEvent::UndoWindowClosed);
        }
        self.awaiting_confirmation = None;

        debug!(accounts = self.list.len(), epoch = self.epoch, "Loaded accounts");
        self.emit(CoordinatorEvent::ListChanged(change));
        Ok(())
    }

    /// Whether the list may be rebuilt from the store right now.
    ///
    /// Refused while a sync session or a storage call is outstanding, and
    /// while an undo window is open, since [`load`](Self::load) would close
    /// it without a word.
    pub fn ensure_reloadable(&self) -> Result<(), IntentError> {
        self.ensure_mutable()?;
        if self.undo.is_pending() {
            return Err(IntentError::UndoPending);
        }
        Ok(())
    }

    // ========== Intents ==========

    /// A row asked to be deleted; the user has to confirm first.
    pub fn request_delete(&mut self, id: &AccountId) -> Result<(), IntentError> {
        self.ensure_mutable()?;
        if self.list.position(id).is_none() {
            return Err(IntentError::NotVisible(id.clone()));
        }
        self.awaiting_confirmation = Some(id.clone());
        self.emit(CoordinatorEvent::DeleteConfirmationRequested {
            account_id: id.clone(),
        });
        Ok(())
    }

    pub fn confirm_delete(&mut self) -> Result<(), IntentError> {
        let id = self
            .awaiting_confirmation
            .clone()
            .ok_or(IntentError::NoPendingConfirmation)?;
        self.delete(&id)
    }

    /// Returns `true` if a confirmation was pending.
    pub fn cancel_delete(&mut self) -> bool {
        self.awaiting_confirmation.take().is_some()
    }

    /// Remove an account optimistically and open the undo window.
    pub fn delete(&mut self, id: &AccountId) -> Result<(), IntentError> {
        self.ensure_mutable()?;
        let index = self
            .list
            .position(id)
            .ok_or_else(|| IntentError::NotVisible(id.clone()))?;
        let (view, change) = self
            .list
            .remove(index, ChangeOrigin::Coordinator)
            .ok_or_else(|| IntentError::NotVisible(id.clone()))?;
        self.emit(CoordinatorEvent::ListChanged(change));

        if let Some(superseded) = self.undo.open(view, index, Instant::now()) {
            // The earlier removal becomes final without warning the user.
            info!(
                account_id = %superseded.view.id(),
                "Undo for previous removal abandoned by a new delete"
            );
        }
        self.arm_undo_timer();
        if self.awaiting_confirmation.as_ref() == Some(id) {
            self.awaiting_confirmation = None;
        }

        self.emit(CoordinatorEvent::Removed {
            account_id: id.clone(),
            index,
        });
        if let Some(deadline) = self.undo.deadline() {
            self.emit(CoordinatorEvent::UndoWindowOpened {
                account_id: id.clone(),
                deadline,
            });
        }

        self.dispatch(StorageCall::Delete { id: id.clone() });
        Ok(())
    }

    /// Restore the pending removal. The row is re-inserted once the store
    /// confirms.
    pub fn undo(&mut self) -> Result<(), IntentError> {
        self.ensure_mutable()?;
        let removal = self.undo.take().ok_or(IntentError::NothingToUndo)?;
        self.cancel_undo_timer();
        self.dispatch(StorageCall::Undo { removal });
        Ok(())
    }

    /// Apply edited fields locally and save them.
    pub fn modify(&mut self, id: &AccountId, update: AccountUpdate) -> Result<(), IntentError> {
        self.ensure_mutable()?;
        if !self.edit_mode.allows_modify() {
            return Err(IntentError::NotInEditMode);
        }
        let index = self
            .list
            .position(id)
            .ok_or_else(|| IntentError::NotVisible(id.clone()))?;

        let mut saved = None;
        let change = self.list.update(index, |row| {
            if row.account.apply(&update) {
                saved = Some(row.account.clone());
            }
        });

        let Some(account) = saved else {
            debug!(account_id = %id, "Edit changed nothing, not saving");
            return Ok(());
        };
        if let Some(change) = change {
            self.emit(CoordinatorEvent::ListChanged(change));
        }
        self.dispatch(StorageCall::Modify { account });
        Ok(())
    }

    /// Drag entry point: move the row at `from` to `to`.
    ///
    /// The move is applied as a user-originated remove/insert pair; the
    /// reorder tracker turns it into one persisted reorder.
    pub fn user_move(&mut self, from: usize, to: usize) -> Result<(), IntentError> {
        self.ensure_mutable()?;
        if !self.edit_mode.allows_reorder() {
            return Err(IntentError::NotInEditMode);
        }
        let len = self.list.len();
        for index in [from, to] {
            if index >= len {
                return Err(IntentError::IndexOutOfRange { index, len });
            }
        }

        let (row, removed) = self
            .list
            .remove(from, ChangeOrigin::User)
            .ok_or(IntentError::IndexOutOfRange { index: from, len })?;
        self.tracker.observe(&removed);
        self.emit(CoordinatorEvent::ListChanged(removed));

        let inserted = self.list.insert(to, row, ChangeOrigin::User);
        let delta = self.tracker.observe(&inserted);
        self.emit(CoordinatorEvent::ListChanged(inserted));

        match delta {
            Some(delta) => self.reorder(delta),
            None => Ok(()),
        }
    }

    /// Persist a move that is already reflected in the visible list.
    pub fn reorder(&mut self, delta: ReorderDelta) -> Result<(), IntentError> {
        self.ensure_mutable()?;
        if delta.is_noop() {
            trace!(index = delta.from, "Dropped onto its own position");
            return Ok(());
        }
        self.dispatch(StorageCall::Reorder(delta));
        Ok(())
    }

    /// Copy the current code of an account to the clipboard.
    pub fn copy_code(&mut self, id: &AccountId) -> Result<(), IntentError> {
        if !self.edit_mode.allows_copy() {
            return Err(IntentError::InEditMode);
        }
        let row = self
            .list
            .find(id)
            .ok_or_else(|| IntentError::NotVisible(id.clone()))?;
        let code = self.codes.code(&row.account);
        let remaining = self.codes.remaining_validity();

        self.clipboard
            .copy(&code, remaining)
            .map_err(|e| IntentError::Clipboard(e.to_string()))?;
        self.emit(CoordinatorEvent::CodeCopied {
            account_id: id.clone(),
        });
        Ok(())
    }

    pub fn set_edit_mode(&mut self, active: bool) -> Result<(), IntentError> {
        if self.gate.is_active() {
            return Err(IntentError::SyncInProgress);
        }
        self.apply_edit_mode(active);
        Ok(())
    }

    /// Start a background synchronization with the remote store.
    pub fn trigger_sync(&mut self) -> Result<(), IntentError> {
        if !self.sync_available() {
            return Err(IntentError::NoRemoteSynchronizer);
        }
        self.ensure_mutable()?;

        self.ensure_sync_forwarder();
        self.apply_edit_mode(false);
        self.enter_gate();
        self.sync_requested = true;

        let store = Arc::clone(&self.store);
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let result = store.trigger_remote_sync().await;
            let _ = tx.send(CoordinatorMessage::SyncTriggered(result));
        });
        info!("Remote synchronization requested");
        Ok(())
    }

    // ========== Message processing ==========

    pub async fn next_message(&mut self) -> Option<CoordinatorMessage> {
        self.inbox_rx.recv().await
    }

    /// Wait for one inbox message and apply it. Returns `false` if the
    /// inbox is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.inbox_rx.recv().await {
            Some(message) => {
                self.handle_message(message).await;
                true
            }
            None => false,
        }
    }

    /// Process messages until no storage call, sync trigger or sync session
    /// is outstanding, then drain whatever is already queued.
    ///
    /// Does not return while the store keeps a sync session open.
    pub async fn settle(&mut self) {
        loop {
            let waiting = self.mutation_in_flight || self.sync_requested || self.gate.is_active();
            let message = if waiting {
                match self.inbox_rx.recv().await {
                    Some(message) => message,
                    None => return,
                }
            } else {
                match self.inbox_rx.try_recv() {
                    Ok(message) => message,
                    Err(_) => return,
                }
            };
            self.handle_message(message).await;
        }
    }

    pub async fn handle_message(&mut self, message: CoordinatorMessage) {
        match message {
            CoordinatorMessage::StorageCompleted {
                call,
                epoch,
                result,
            } => self.on_storage_completed(call, epoch, result).await,
            CoordinatorMessage::SyncTriggered(result) => self.on_sync_triggered(result).await,
            CoordinatorMessage::Sync(SyncEvent::Started) => self.enter_gate(),
            CoordinatorMessage::Sync(SyncEvent::Completed(result)) => {
                self.on_sync_completed(result).await
            }
            CoordinatorMessage::UndoExpired { generation } => self.on_undo_expired(generation),
            CoordinatorMessage::Row(row) => self.on_row_message(row),
        }
    }

    async fn on_storage_completed(
        &mut self,
        call: StorageCall,
        epoch: u64,
        result: Result<(), StoreError>,
    ) {
        self.mutation_in_flight = false;
        let closes_undo = matches!(call, StorageCall::Undo { .. });

        match result {
            Ok(()) if epoch == self.epoch => {
                debug!(call = call.name(), "Storage call succeeded");
                self.apply_success(call);
            }
            Ok(()) => {
                debug!(call = call.name(), "List reloaded meanwhile, skipping local effects");
            }
            Err(err) => {
                let notice = call.failure_notice(err.kind());
                self.recover(err, notice, call.name()).await;
            }
        }

        if closes_undo {
            self.emit(CoordinatorEvent::UndoWindowClosed);
        }
    }

    fn apply_success(&mut self, call: StorageCall) {
        match call {
            StorageCall::Undo { removal } => {
                let PendingRemoval {
                    mut view, index, ..
                } = removal;
                view.show(self.edit_mode.is_active());
                let change = self.list.insert(index, view, ChangeOrigin::Coordinator);
                self.tracker.observe(&change);
                self.emit(CoordinatorEvent::ListChanged(change));
            }
            StorageCall::Modify { account } => {
                self.emit(CoordinatorEvent::Modified {
                    account_id: account.id,
                });
            }
            StorageCall::Delete { .. } | StorageCall::Reorder(_) => {}
        }
    }

    async fn on_sync_triggered(&mut self, result: Result<(), StoreError>) {
        self.sync_requested = false;
        match result {
            Ok(()) => debug!("Remote synchronization started"),
            Err(err) => {
                let notice = if err.kind() == FailureKind::Network {
                    Notice::NoInternetConnection
                } else {
                    Notice::SyncRolledBack
                };
                self.recover(err, notice, "sync").await;
            }
        }
    }

    async fn on_sync_completed(&mut self, result: SyncResult) {
        info!(
            has_changes = result.has_changes,
            successful = result.successful,
            "Synchronization completed"
        );

        if result.has_changes {
            if let Err(err) = self.load().await {
                if err.is_recoverable() {
                    warn!(error = %err, "Reload after synchronization failed");
                    self.emit(CoordinatorEvent::Notice(Notice::SyncRolledBack));
                } else {
                    error!(error = %err, "Reload after synchronization failed");
                    self.fail(err.to_string());
                }
            }
        } else if !result.successful {
            self.rollback(Notice::SyncRolledBack).await;
        }

        self.leave_gate();
        self.config.first_load = false;
    }

    fn on_undo_expired(&mut self, generation: u64) {
        if generation != self.undo_generation {
            trace!(generation, "Ignoring stale undo timer");
            return;
        }
        self.undo_timer = None;
        if let Some(expired) = self.undo.expire(Instant::now()) {
            debug!(account_id = %expired.view.id(), "Undo window expired");
            self.emit(CoordinatorEvent::UndoWindowClosed);
        }
    }

    fn on_row_message(&mut self, row: RowMessage) {
        let RowMessage { account_id, kind } = row;
        let result = match kind {
            RowMessageKind::DeleteRequested => self.request_delete(&account_id),
            RowMessageKind::CopyPerformed => self.copy_code(&account_id),
            RowMessageKind::Removed => {
                trace!(account_id = %account_id, "Row removal animation finished");
                Ok(())
            }
            RowMessageKind::Modified(update) => self.modify(&account_id, update),
        };
        if let Err(err) = result {
            debug!(account_id = %account_id, error = %err, "Row intent rejected");
            self.emit(CoordinatorEvent::IntentRejected(err));
        }
    }

    // ========== Failure handling ==========

    async fn recover(&mut self, err: StoreError, notice: Notice, action: &'static str) {
        if err.is_recoverable() {
            warn!(action, kind = %err.kind(), error = %err, "Change rejected, rolling back");
            self.rollback(notice).await;
        } else {
            error!(action, error = %err, "Unrecoverable storage failure");
            self.fail(err.to_string());
        }
    }

    /// Reload from the store, leave edit mode, re-enable affordances and
    /// tell the user what happened.
    async fn rollback(&mut self, notice: Notice) {
        if let Err(err) = self.load().await {
            if !err.is_recoverable() {
                error!(error = %err, "Reload during rollback failed");
                self.fail(err.to_string());
                return;
            }
            warn!(error = %err, "Reload during rollback failed, keeping current list");
        }

        self.apply_edit_mode(false);
        if !self.store.is_sync_in_flight() {
            self.leave_gate();
        }
        self.emit(CoordinatorEvent::Notice(notice));
    }

    fn fail(&self, detail: String) {
        self.emit(CoordinatorEvent::Fatal { detail });
    }

    // ========== Internals ==========

    fn ensure_mutable(&self) -> Result<(), IntentError> {
        if self.gate.is_active() {
            return Err(IntentError::SyncInProgress);
        }
        if self.mutation_in_flight {
            return Err(IntentError::Busy);
        }
        Ok(())
    }

    fn dispatch(&mut self, call: StorageCall) {
        self.mutation_in_flight = true;
        let store = Arc::clone(&self.store);
        let tx = self.inbox_tx.clone();
        let epoch = self.epoch;
        debug!(call = call.name(), "Dispatching storage call");

        tokio::spawn(async move {
            let result = match &call {
                StorageCall::Delete { id } => store.remove(id).await,
                StorageCall::Undo { .. } => store.undo_remove().await,
                StorageCall::Modify { account } => store.save(account).await,
                StorageCall::Reorder(delta) => store.reorder(delta.from, delta.to).await,
            };
            let _ = tx.send(CoordinatorMessage::StorageCompleted {
                call,
                epoch,
                result,
            });
        });
    }

    fn apply_edit_mode(&mut self, active: bool) {
        if self.edit_mode.set(active) {
            self.list.set_edit_mode(active);
            self.emit(CoordinatorEvent::EditModeChanged(active));
        }
    }

    fn enter_gate(&mut self) {
        if self.gate.try_enter() {
            info!("Synchronization session started");
            self.emit(CoordinatorEvent::GateChanged(GateState::Active));
        }
    }

    fn leave_gate(&mut self) {
        if self.gate.leave() {
            self.emit(CoordinatorEvent::GateChanged(GateState::Idle));
        }
    }

    fn arm_undo_timer(&mut self) {
        self.cancel_undo_timer();
        let Some(deadline) = self.undo.deadline() else {
            return;
        };
        let generation = self.undo_generation;
        let tx = self.inbox_tx.clone();
        self.undo_timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(CoordinatorMessage::UndoExpired { generation });
        }));
    }

    fn cancel_undo_timer(&mut self) {
        self.undo_generation += 1;
        if let Some(timer) = self.undo_timer.take() {
            timer.abort();
        }
    }

    fn ensure_sync_forwarder(&mut self) {
        if self.sync_forwarder.is_some() {
            return;
        }
        let mut events = self.store.subscribe();
        let tx = self.inbox_tx.clone();
        self.sync_forwarder = Some(tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if tx.send(CoordinatorMessage::Sync(event)).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed synchronization events");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }));
    }

    fn emit(&self, event: CoordinatorEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for ListCoordinator {
    fn drop(&mut self) {
        if let Some(timer) = self.undo_timer.take() {
            timer.abort();
        }
        if let Some(forwarder) = self.sync_forwarder.take() {
            forwarder.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{FixedCodeSource, InMemoryAccountStore, RecordingClipboard};
    use crate::models::Account;

    fn coordinator(store: &InMemoryAccountStore) -> ListCoordinator {
        let (coordinator, _events) = ListCoordinator::new(
            Arc::new(store.clone()),
            Arc::new(FixedCodeSource::new("123456")),
            Arc::new(RecordingClipboard::new()),
            SessionConfig::default(),
        );
        coordinator
    }

    fn accounts(ids: &[&str]) -> Vec<Account> {
        ids.iter()
            .map(|id| Account::with_id(*id, id.to_uppercase(), "user", vec![1]))
            .collect()
    }

    #[tokio::test]
    async fn test_affordances_follow_mode_and_busy_state() {
        let store = InMemoryAccountStore::with_accounts(accounts(&["a", "b"]));
        let mut coordinator = coordinator(&store);
        coordinator.load().await.unwrap();

        let idle = coordinator.affordances();
        assert!(idle.delete);
        assert!(!idle.reorder);
        assert!(!idle.undo);
        assert!(!idle.synchronize);

        coordinator.set_edit_mode(true).unwrap();
        assert!(coordinator.affordances().reorder);

        coordinator.delete(&AccountId::from("a")).unwrap();
        let busy = coordinator.affordances();
        assert!(!busy.delete);
        assert!(!busy.reorder);
        assert!(busy.toggle_edit);

        coordinator.settle().await;
        assert!(coordinator.affordances().undo);
    }

    #[tokio::test]
    async fn test_drop_aborts_timers() {
        let store = InMemoryAccountStore::with_accounts(accounts(&["a"]));
        let mut coordinator = coordinator(&store);
        coordinator.load().await.unwrap();
        coordinator.delete(&AccountId::from("a")).unwrap();
        coordinator.settle().await;
        assert!(coordinator.pending_removal().is_some());
        drop(coordinator);
    }
}
