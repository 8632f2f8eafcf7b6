//! Session state for the tracker
//!
//! [`Session`] owns everything the UI shows: the cached record list, the
//! loading flag, the add-form mode and the two pending selections. It is the
//! only thing that talks to the record store.
//!
//! # Flow
//!
//! ```text
//! key press ──▶ Session::submit / remove / reload
//!                    │ spawns gateway task
//!                    ▼
//!              TrainingStore call
//!                    │ StoreEvent over mpsc
//!                    ▼
//!              Session::apply ──▶ insert/delete ok? start full reload
//! ```
//!
//! There is no optimistic update. After a successful mutation the list is
//! fetched again and replaced wholesale; the last fetch applied wins.
//! Gateway failures are logged and swallowed here, so nothing above the
//! session ever sees a `StoreError`.

pub mod aggregate;
mod events;

#[cfg(test)]
mod tests;

pub use aggregate::{derived_counts, grouped_by_day, nonzero_counts, DayGroup};
pub use events::{FetchReason, StoreEvent};

use crate::model::{TrainingId, TrainingRecord, TrainingType, Weekday};
use crate::store::SharedStore;
use std::collections::BTreeMap;
use std::future::Future;
use tokio::sync::mpsc;

/// Buffer for gateway completions; calls are user-driven so this never fills
const EVENT_BUFFER: usize = 64;

/// Everything the renderer needs, as a plain value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Cached copy of the remote collection, descending by id
    pub records: Vec<TrainingRecord>,
    /// A full fetch is in flight
    pub is_loading: bool,
    /// The add form is open
    pub is_adding_mode: bool,
    pub selected_day: Option<Weekday>,
    pub selected_type: Option<TrainingType>,
}

impl ViewState {
    /// Both selections made, so submit would issue an insert
    pub fn can_submit(&self) -> bool {
        self.selected_day.is_some() && self.selected_type.is_some()
    }

    /// Record count for every training type, zeros included
    pub fn derived_counts(&self) -> BTreeMap<TrainingType, usize> {
        derived_counts(&self.records)
    }

    /// Records partitioned by weekday, Sunday first, empty days included
    pub fn grouped_by_day(&self) -> Vec<DayGroup<'_>> {
        grouped_by_day(&self.records)
    }
}

pub struct Session {
    state: ViewState,
    store: SharedStore,
    events: mpsc::Sender<StoreEvent>,
    /// Gateway calls spawned but not yet applied
    pending: usize,
    /// Fetches spawned but not yet applied (drives `is_loading`)
    fetches: usize,
}

impl Session {
    /// Create a session that reports completions on `events`
    pub fn new(store: SharedStore, events: mpsc::Sender<StoreEvent>) -> Self {
        Self {
            state: ViewState::default(),
            store,
            events,
            pending: 0,
            fetches: 0,
        }
    }

    /// Create a session together with the receiver its completions arrive on
    pub fn with_channel(store: SharedStore) -> (Self, mpsc::Receiver<StoreEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        (Self::new(store, tx), rx)
    }

    /// Current state
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Immutable copy for one render cycle
    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    /// Gateway calls still running
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Name of the backing store, for the status bar
    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Load the record list for the first time
    pub fn initialize(&mut self) {
        self.fetch(FetchReason::Startup);
    }

    /// Fetch the record list again on request
    pub fn reload(&mut self) {
        self.fetch(FetchReason::Manual);
    }

    /// Open the add form; earlier selections are kept
    pub fn begin_add(&mut self) {
        self.state.is_adding_mode = true;
    }

    pub fn select_day(&mut self, day: Weekday) {
        self.state.selected_day = Some(day);
    }

    pub fn select_type(&mut self, kind: TrainingType) {
        self.state.selected_type = Some(kind);
    }

    /// Close the add form
    ///
    /// Selections are left as they are and show up again on the next
    /// `begin_add`.
    pub fn cancel_add(&mut self) {
        self.state.is_adding_mode = false;
    }

    /// Insert the selected day and type
    ///
    /// Returns `false` without calling the store when either selection is
    /// missing. Otherwise returns `true`; the form closes only once the
    /// insert succeeded and the follow-up reload has been applied.
    pub fn submit(&mut self) -> bool {
        let (Some(day), Some(kind)) = (self.state.selected_day, self.state.selected_type) else {
            tracing::debug!("Submit ignored: day or type not selected");
            return false;
        };

        let store = self.store.clone();
        self.spawn(async move {
            let result = store.insert(day, kind).await;
            StoreEvent::Inserted { day, kind, result }
        });
        true
    }

    /// Delete a record by id
    pub fn remove(&mut self, id: TrainingId) {
        let store = self.store.clone();
        self.spawn(async move {
            let result = store.delete_by_id(id).await;
            StoreEvent::Removed { id, result }
        });
    }

    /// Apply a completed gateway call
    pub fn apply(&mut self, event: StoreEvent) {
        self.pending = self.pending.saturating_sub(1);

        match event {
            StoreEvent::Fetched { reason, result } => {
                self.fetches = self.fetches.saturating_sub(1);
                self.state.is_loading = self.fetches > 0;

                match result {
                    Ok(records) => {
                        tracing::debug!("Loaded {} trainings ({:?})", records.len(), reason);
                        self.state.records = records;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load trainings: {}", e);
                    }
                }

                if reason == FetchReason::AfterInsert {
                    self.state.selected_day = None;
                    self.state.selected_type = None;
                    self.state.is_adding_mode = false;
                }
            }
            StoreEvent::Inserted { day, kind, result } => match result {
                Ok(()) => {
                    tracing::info!("Saved training: {} on {}", kind, day);
                    self.fetch(FetchReason::AfterInsert);
                }
                Err(e) => {
                    tracing::warn!("Failed to save training ({} on {}): {}", kind, day, e);
                }
            },
            StoreEvent::Removed { id, result } => match result {
                Ok(()) => {
                    tracing::info!("Removed training {}", id);
                    self.fetch(FetchReason::AfterRemove);
                }
                Err(e) => {
                    tracing::warn!("Failed to remove training {}: {}", id, e);
                }
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────

    fn fetch(&mut self, reason: FetchReason) {
        self.fetches += 1;
        self.state.is_loading = true;

        let store = self.store.clone();
        self.spawn(async move {
            let result = store.list_all().await;
            StoreEvent::Fetched { reason, result }
        });
    }

    /// Run a gateway call on its own task and report back over the channel
    fn spawn<F>(&mut self, call: F)
    where
        F: Future<Output = StoreEvent> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.events.clone();
        tokio::spawn(async move {
            let event = call.await;
            if tx.send(event).await.is_err() {
                tracing::debug!("Session closed before store call completed");
            }
        });
    }
}
