//! In-memory record store
//!
//! Behaves like the remote table (server-assigned increasing ids, descending
//! list order, not-found deletes fail) without any I/O. Used by demo mode and
//! as the gateway fake in tests: every call is logged, and failures can be
//! scripted for the next N calls.

use super::{StoreError, TrainingStore};
use crate::model::{today_label, TrainingId, TrainingRecord, TrainingType, Weekday};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A gateway call as observed by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListAll,
    Insert(Weekday, TrainingType),
    Delete(TrainingId),
}

#[derive(Debug)]
struct Inner {
    records: Vec<TrainingRecord>,
    next_id: i64,
    calls: Vec<StoreCall>,
    /// Error returned by the next `failures` calls
    failure: Option<StoreError>,
    failures: usize,
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
    /// Fixed creation date; `None` stamps today
    date: Option<String>,
    /// Simulated round-trip time
    latency: Duration,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_id: 1,
                calls: Vec::new(),
                failure: None,
                failures: 0,
            }),
            date: None,
            latency: Duration::ZERO,
        }
    }

    /// Start from existing records; new ids continue after the highest one
    pub fn with_records(records: Vec<TrainingRecord>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            inner.next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
            inner.records = records;
        }
        store
    }

    #[cfg(test)]
    /// Stamp every insert with this date label
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// A small week of workouts for demo mode
    pub fn seeded_demo() -> Self {
        let seed = [
            (Weekday::Segunda, TrainingType::Peito),
            (Weekday::Segunda, TrainingType::Cardio),
            (Weekday::Terca, TrainingType::Costas),
            (Weekday::Quarta, TrainingType::Pernas),
            (Weekday::Sexta, TrainingType::Ombros),
            (Weekday::Sexta, TrainingType::Bracos),
            (Weekday::Sabado, TrainingType::Cardio),
        ];
        let today = today_label();
        let records = seed
            .into_iter()
            .enumerate()
            .map(|(i, (day, kind))| TrainingRecord {
                id: TrainingId(i as i64 + 1),
                day,
                kind,
                date: today.clone(),
            })
            .collect();

        Self::with_records(records).with_latency(Duration::from_millis(250))
    }

    #[cfg(test)]
    /// Make the next `count` calls fail with `error`
    pub fn fail_next(&self, count: usize, error: StoreError) {
        let mut inner = self.lock();
        inner.failure = Some(error);
        inner.failures = count;
    }

    #[cfg(test)]
    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Current contents, descending by id
    pub fn snapshot(&self) -> Vec<TrainingRecord> {
        let mut records = self.lock().records.clone();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log the call and consume a scripted failure, if any
    async fn begin(&self, call: StoreCall) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut inner = self.lock();
        inner.calls.push(call);
        if inner.failures > 0 {
            inner.failures -= 1;
            if let Some(error) = inner.failure.clone() {
                return Err(error);
            }
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrainingStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_all(&self) -> Result<Vec<TrainingRecord>, StoreError> {
        self.begin(StoreCall::ListAll).await?;
        Ok(self.snapshot())
    }

    async fn insert(&self, day: Weekday, kind: TrainingType) -> Result<(), StoreError> {
        self.begin(StoreCall::Insert(day, kind)).await?;

        let date = self.date.clone().unwrap_or_else(today_label);
        let mut inner = self.lock();
        let id = TrainingId(inner.next_id);
        inner.next_id += 1;
        inner.records.push(TrainingRecord {
            id,
            day,
            kind,
            date,
        });
        Ok(())
    }

    async fn delete_by_id(&self, id: TrainingId) -> Result<(), StoreError> {
        self.begin(StoreCall::Delete(id)).await?;

        let mut inner = self.lock();
        let before = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
