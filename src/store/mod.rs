//! Record store gateway
//!
//! The tracker never owns persistent data. Everything goes through the
//! [`TrainingStore`] trait, which mirrors the three operations the remote
//! `trainings` table supports.
//!
//! # Architecture
//!
//! ```text
//! TrainingStore trait
//! ├── RestStore   (PostgREST / Supabase over HTTP)
//! └── MemoryStore (in-process, demo mode and tests)
//! ```

mod memory;
mod rest;

pub use memory::MemoryStore;
#[cfg(test)]
pub use memory::StoreCall;
pub use rest::RestStore;

use crate::config::Config;
use crate::model::{TrainingId, TrainingRecord, TrainingType, ValidationError, Weekday};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by any gateway call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Network failure, timeout, or client construction error
    #[error("transport error: {0}")]
    Transport(String),

    /// Store answered with a non-success status
    #[error("store error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Delete targeted an id the store does not have
    #[error("training {0} not found")]
    NotFound(TrainingId),

    /// Response body did not match the record shape
    #[error("malformed response: {0}")]
    Decode(String),

    /// Day or type outside the fixed sets
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Gateway over the external record collection
///
/// Implementations must not return partial results: `list_all` either
/// yields the whole collection or an error.
#[async_trait]
pub trait TrainingStore: Send + Sync {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Every record, descending by id
    async fn list_all(&self) -> Result<Vec<TrainingRecord>, StoreError>;

    /// Insert a record; the store assigns the id and the gateway stamps today's date
    async fn insert(&self, day: Weekday, kind: TrainingType) -> Result<(), StoreError>;

    /// Delete by id. A missing id is [`StoreError::NotFound`], never success.
    async fn delete_by_id(&self, id: TrainingId) -> Result<(), StoreError>;
}

/// Shared handle used by the session and spawned gateway tasks
pub type SharedStore = Arc<dyn TrainingStore>;

/// Build the gateway selected by configuration
///
/// Demo mode runs against a seeded in-memory store, so the TUI can be tried
/// without a backend.
pub fn from_config(config: &Config) -> anyhow::Result<SharedStore> {
    if config.demo_mode {
        tracing::info!("Running in DEMO MODE - using a seeded in-memory store");
        return Ok(Arc::new(MemoryStore::seeded_demo()));
    }

    let store = RestStore::new(&config.store)?;
    Ok(Arc::new(store))
}
