//! Completions that flow from gateway tasks back to the session
//!
//! Every gateway call runs on its own tokio task. When it finishes, the task
//! sends one of these over the session's mpsc channel, and the UI loop hands
//! it to `Session::apply`. State is never touched from the task itself.

use crate::model::{TrainingId, TrainingRecord, TrainingType, Weekday};
use crate::store::StoreError;

/// Why a full fetch was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// First load after startup
    Startup,
    /// Reconciliation after a successful insert; clears the add form when done
    AfterInsert,
    /// Reconciliation after a successful delete
    AfterRemove,
    /// User asked for a refresh
    Manual,
}

/// Result of one gateway call
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Fetched {
        reason: FetchReason,
        result: Result<Vec<TrainingRecord>, StoreError>,
    },
    Inserted {
        day: Weekday,
        kind: TrainingType,
        result: Result<(), StoreError>,
    },
    Removed {
        id: TrainingId,
        result: Result<(), StoreError>,
    },
}
