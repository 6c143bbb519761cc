//! Common test utilities for integration tests.
//!
//! # Example
//!
//! ```ignore
//! use common::{store_with, TestCoordinator};
//!
//! let mut t = TestCoordinator::builder(store_with(&["a", "b"])).start().await;
//! t.coordinator.delete(&"a".into()).unwrap();
//! t.coordinator.settle().await;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use authenticator::coordinator::{CoordinatorEvent, GateState, ListCoordinator, Notice};
use authenticator::startup::SessionConfig;
use tokio::sync::mpsc;

/// A coordinator wired to in-memory doubles, plus handles to inspect them.
pub struct TestCoordinator {
    pub coordinator: ListCoordinator,
    pub events: mpsc::UnboundedReceiver<CoordinatorEvent>,
    pub store: InMemoryAccountStore,
    pub clipboard: RecordingClipboard,
}

pub struct TestCoordinatorBuilder {
    store: InMemoryAccountStore,
    config: SessionConfig,
    codes: FixedCodeSource,
}

impl TestCoordinatorBuilder {
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_codes(mut self, codes: FixedCodeSource) -> Self {
        self.codes = codes;
        self
    }

    pub fn build(self) -> TestCoordinator {
        let clipboard = RecordingClipboard::new();
        let (coordinator, events) = ListCoordinator::new(
            Arc::new(self.store.clone()),
            Arc::new(self.codes),
            Arc::new(clipboard.clone()),
            self.config,
        );
        TestCoordinator {
            coordinator,
            events,
            store: self.store,
            clipboard,
        }
    }

    /// Build, run the initial load, settle and discard startup events.
    pub async fn start(self) -> TestCoordinator {
        let mut t = self.build();
        t.coordinator.start().await.expect("initial load");
        t.coordinator.settle().await;
        t.drain_events();
        t.store.clear_calls();
        t
    }
}

impl TestCoordinator {
    pub fn builder(store: InMemoryAccountStore) -> TestCoordinatorBuilder {
        TestCoordinatorBuilder {
            store,
            config: SessionConfig::default(),
            codes: FixedCodeSource::new(TEST_CODE),
        }
    }

    /// Ids of the visible rows, in order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.coordinator
            .visible()
            .iter()
            .map(|row| row.id().as_str().to_string())
            .collect()
    }

    pub fn visible_services(&self) -> Vec<String> {
        self.coordinator
            .visible()
            .iter()
            .map(|row| row.account.service.clone())
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<CoordinatorEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    /// Process messages until the sync trigger has been answered.
    pub async fn await_sync_trigger(&mut self) {
        while self.coordinator.is_sync_requested() {
            assert!(self.coordinator.process_next().await, "inbox closed");
        }
    }
}

pub fn notices(events: &[CoordinatorEvent]) -> Vec<Notice> {
    events
        .iter()
        .filter_map(|event| match event {
            CoordinatorEvent::Notice(notice) => Some(*notice),
            _ => None,
        })
        .collect()
}

pub fn gate_changes(events: &[CoordinatorEvent]) -> Vec<GateState> {
    events
        .iter()
        .filter_map(|event| match event {
            CoordinatorEvent::GateChanged(state) => Some(*state),
            _ => None,
        })
        .collect()
}

pub fn has_fatal(events: &[CoordinatorEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, CoordinatorEvent::Fatal { .. }))
}

pub fn count_calls(store: &InMemoryAccountStore, call: &StoreCall) -> usize {
    store.calls().iter().filter(|c| *c == call).count()
}
