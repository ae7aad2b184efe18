//! Record Data Access Interface and its backends.
//!
//! The form controller only ever talks to a [`RecordStore`]; id generation, timestamps, constraints and
//! row-level security all live behind it.

pub mod memory;
#[cfg(any(test, feature = "testing"))]
pub mod recording;
pub mod rest;

use crate::error::StoreError;
use crate::record::{Record, RecordId, UserId};
use async_trait::async_trait;
use std::sync::Arc;

pub use memory::{MemoryStore, TableConstraints};
#[cfg(any(test, feature = "testing"))]
pub use recording::{RecordingStore, StoreCall};
pub use rest::RestStore;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_by_id(&self, table: &str, id: &RecordId) -> Result<Record, StoreError>;

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId, StoreError>;

    async fn update(&self, table: &str, id: &RecordId, partial: Record) -> Result<(), StoreError>;

    async fn current_user(&self) -> Option<UserId>;

    /// Most recently created rows first.
    async fn list(&self, table: &str, limit: usize) -> Result<Vec<Record>, StoreError>;
}

#[async_trait]
impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    async fn fetch_by_id(&self, table: &str, id: &RecordId) -> Result<Record, StoreError> {
        (**self).fetch_by_id(table, id).await
    }

    async fn insert(&self, table: &str, record: Record) -> Result<RecordId, StoreError> {
        (**self).insert(table, record).await
    }

    async fn update(&self, table: &str, id: &RecordId, partial: Record) -> Result<(), StoreError> {
        (**self).update(table, id, partial).await
    }

    async fn current_user(&self) -> Option<UserId> {
        (**self).current_user().await
    }

    async fn list(&self, table: &str, limit: usize) -> Result<Vec<Record>, StoreError> {
        (**self).list(table, limit).await
    }
}
