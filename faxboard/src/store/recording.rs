use crate::error::StoreError;
use crate::record::{Record, RecordId, UserId};
use crate::store::RecordStore;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

#[derive(Clone, Debug, PartialEq)]
pub enum StoreCall {
    FetchById { table: String, id: RecordId },
    Insert { table: String, record: Record },
    Update { table: String, id: RecordId, partial: Record },
    CurrentUser,
    List { table: String, limit: usize },
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        matches!(self, StoreCall::Insert { .. } | StoreCall::Update { .. })
    }
}

/// Wraps a store, recording every call in order. Calls can be held at the store boundary with
/// [`RecordingStore::gated`] and let through one at a time with [`RecordingStore::release`], and
/// failures can be queued with [`RecordingStore::fail_next`].
pub struct RecordingStore<S> {
    inner: S,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<VecDeque<StoreError>>,
    gate: Option<Semaphore>,
}

impl<S: RecordStore> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        RecordingStore { inner, calls: Mutex::new(Vec::new()), failures: Mutex::new(VecDeque::new()), gate: None }
    }

    pub fn gated(inner: S) -> Self {
        RecordingStore { gate: Some(Semaphore::new(0)), ..Self::new(inner) }
    }

    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    pub fn fail_next(&self, error: StoreError) {
        lock(&self.failures).push_back(error);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn writes(&self) -> Vec<StoreCall> {
        self.calls().into_iter().filter(StoreCall::is_write).collect()
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn enter(&self, call: StoreCall) -> Result<(), StoreError> {
        lock(&self.calls).push(call);
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        match lock(&self.failures).pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl<S: RecordStore> RecordStore for RecordingStore<S> {
    async fn fetch_by_id(&self, table: &str, id: &RecordId) -> Result<Record, StoreError> {
        self.enter(StoreCall::FetchById { table: table.to_string(), id: id.clone() }).await?;
        self.inner.fetch_by_id(table, id).await
    }

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId, StoreError> {
        self.enter(StoreCall::Insert { table: table.to_string(), record: record.clone() }).await?;
        self.inner.insert(table, record).await
    }

    async fn update(&self, table: &str, id: &RecordId, partial: Record) -> Result<(), StoreError> {
        self.enter(StoreCall::Update { table: table.to_string(), id: id.clone(), partial: partial.clone() }).await?;
        self.inner.update(table, id, partial).await
    }

    async fn current_user(&self) -> Option<UserId> {
        lock(&self.calls).push(StoreCall::CurrentUser);
        self.inner.current_user().await
    }

    async fn list(&self, table: &str, limit: usize) -> Result<Vec<Record>, StoreError> {
        self.enter(StoreCall::List { table: table.to_string(), limit }).await?;
        self.inner.list(table, limit).await
    }
}
