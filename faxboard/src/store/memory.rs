use crate::error::StoreError;
use crate::record::{Record, RecordId, UserId};
use crate::registry::Registry;
use crate::store::RecordStore;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Clone, Debug, Default)]
pub struct TableConstraints {
    pub not_null: Vec<String>,
    pub unique: Vec<String>,
}

impl TableConstraints {
    pub fn not_null<I: IntoIterator<Item = S>, S: Into<String>>(mut self, columns: I) -> Self {
        self.not_null.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn unique<I: IntoIterator<Item = S>, S: Into<String>>(mut self, columns: I) -> Self {
        self.unique.extend(columns.into_iter().map(Into::into));
        self
    }

    fn check(&self, table: &str, row: &Record, others: &[Record]) -> Result<(), StoreError> {
        for column in &self.not_null {
            if row.get(column).map_or(true, Value::is_null) {
                return Err(StoreError::Rejected(format!(
                    "null value in column \"{}\" of relation \"{}\" violates not-null constraint",
                    column, table
                )));
            }
        }
        for column in &self.unique {
            let Some(value) = row.get(column).filter(|v| !v.is_null()) else { continue };
            if others.iter().any(|other| other.get(column) == Some(value)) {
                return Err(StoreError::Rejected(format!(
                    "duplicate key value violates unique constraint \"{}_{}_key\"",
                    table, column
                )));
            }
        }
        Ok(())
    }
}

/// In-process backend: generates ids and timestamps and enforces simple column constraints the way the
/// hosted database would, so rejections carry realistic messages.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
    constraints: HashMap<String, TableConstraints>,
    user: Option<UserId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<UserId>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_constraints(mut self, table: &str, constraints: TableConstraints) -> Self {
        self.constraints.insert(table.to_string(), constraints);
        self
    }

    /// Every required field of every registered schema becomes a NOT NULL column.
    pub fn constrain_required(mut self, registry: &Registry) -> Self {
        for schema in registry.iter() {
            let required = schema.fields.iter().filter(|f| f.required).map(|f| f.name);
            let constraints = self.constraints.remove(schema.table).unwrap_or_default().not_null(required);
            self.constraints.insert(schema.table.to_string(), constraints);
        }
        self
    }

    /// Stores a row as-is, bypassing constraints. A missing `id` is generated.
    pub async fn seed(&self, table: &str, mut record: Record) -> RecordId {
        let id = match record.get("id").and_then(Value::as_str) {
            Some(id) => RecordId::from(id),
            None => new_id(),
        };
        let now = Value::String(Utc::now().to_rfc3339());
        record.insert("id".into(), Value::String(id.0.clone()));
        record.entry("created_at").or_insert_with(|| now.clone());
        record.entry("updated_at").or_insert(now);
        self.tables.write().await.entry(table.to_string()).or_default().push(record);
        id
    }

    pub async fn count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }

    fn check(&self, table: &str, row: &Record, others: &[Record]) -> Result<(), StoreError> {
        match self.constraints.get(table) {
            Some(constraints) => constraints.check(table, row, others),
            None => Ok(()),
        }
    }
}

fn new_id() -> RecordId {
    let raw = format!("{:032x}", rand::random::<u128>());
    RecordId(format!("{}-{}-{}-{}-{}", &raw[0..8], &raw[8..12], &raw[12..16], &raw[16..20], &raw[20..32]))
}

fn row_id(row: &Record) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_by_id(&self, table: &str, id: &RecordId) -> Result<Record, StoreError> {
        let tables = self.tables.read().await;
        tables
            .get(table)
            .and_then(|rows| rows.iter().find(|row| row_id(row) == Some(id.as_str())))
            .cloned()
            .ok_or_else(|| StoreError::not_found(table, id))
    }

    async fn insert(&self, table: &str, mut record: Record) -> Result<RecordId, StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        self.check(table, &record, rows)?;
        let id = new_id();
        let now = Value::String(Utc::now().to_rfc3339());
        record.insert("id".into(), Value::String(id.0.clone()));
        record.insert("created_at".into(), now.clone());
        record.insert("updated_at".into(), now);
        rows.push(record);
        Ok(id)
    }

    async fn update(&self, table: &str, id: &RecordId, partial: Record) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let rows = tables.get_mut(table).ok_or_else(|| StoreError::not_found(table, id))?;
        let position = rows
            .iter()
            .position(|row| row_id(row) == Some(id.as_str()))
            .ok_or_else(|| StoreError::not_found(table, id))?;
        let mut merged = rows[position].clone();
        for (column, value) in partial {
            if column != "id" {
                merged.insert(column, value);
            }
        }
        let others: Vec<Record> =
            rows.iter().enumerate().filter(|(i, _)| *i != position).map(|(_, row)| row.clone()).collect();
        self.check(table, &merged, &others)?;
        merged.insert("updated_at".into(), Value::String(Utc::now().to_rfc3339()));
        rows[position] = merged;
        Ok(())
    }

    async fn current_user(&self) -> Option<UserId> {
        self.user.clone()
    }

    async fn list(&self, table: &str, limit: usize) -> Result<Vec<Record>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.get(table).map(|rows| rows.iter().rev().take(limit).cloned().collect()).unwrap_or_default())
    }
}
