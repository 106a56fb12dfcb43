//! Record store over key-value storage
//!
//! A scope holds one ordered list of records serialized as a single JSON
//! array. Every mutation rewrites the whole array.

use std::fmt;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::storage::KeyValueStore;

/// Storage namespace a record list is persisted under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey(String);

impl ScopeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted list element identified by a string id
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn id(&self) -> &str;

    /// Stamp a record that is about to be appended for the first time
    fn assign_identity(&mut self, id: String, created_at: DateTime<Utc>);
}

/// Generate a timestamp-derived id that `is_taken` does not reject
///
/// The id is the Unix time in milliseconds, bumped by one until free.
pub fn timestamp_id(now: DateTime<Utc>, is_taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now.timestamp_millis();
    loop {
        let candidate = millis.to_string();
        if !is_taken(&candidate) {
            return candidate;
        }
        millis += 1;
    }
}

/// Read the JSON array stored under `scope`, empty when absent
pub async fn read_list<S, R>(store: &S, scope: &ScopeKey) -> StorageResult<Vec<R>>
where
    S: KeyValueStore,
    R: DeserializeOwned,
{
    match store.get(scope.as_str()).await? {
        Some(blob) => serde_json::from_str(&blob)
            .map_err(|e| StorageError::serialization(scope.as_str(), e)),
        None => Ok(Vec::new()),
    }
}

/// Overwrite the JSON array stored under `scope`
pub async fn write_list<S, R>(store: &S, scope: &ScopeKey, records: &[R]) -> StorageResult<()>
where
    S: KeyValueStore,
    R: Serialize,
{
    let blob =
        serde_json::to_string(records).map_err(|e| StorageError::serialization(scope.as_str(), e))?;
    store.set(scope.as_str(), &blob).await
}

/// Generic list-per-scope store
pub struct RecordStore<S, R> {
    store: S,
    _record: PhantomData<fn() -> R>,
}

impl<S: Clone, R> Clone for RecordStore<S, R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _record: PhantomData,
        }
    }
}

impl<S, R> RecordStore<S, R>
where
    S: KeyValueStore,
    R: Record,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// List the records of a scope in stored order
    pub async fn list(&self, scope: &ScopeKey) -> StorageResult<Vec<R>> {
        let records = read_list(&self.store, scope).await?;
        debug!("Loaded {} records from {}", records.len(), scope);
        Ok(records)
    }

    /// Replace the record with the same id in place, or append it with a
    /// fresh id and creation time. Returns the stored record
    pub async fn upsert(&self, scope: &ScopeKey, record: R) -> StorageResult<R> {
        let (stored, _) = self.upsert_listed(scope, record).await?;
        Ok(stored)
    }

    /// Same as [`RecordStore::upsert`], also returning the full list that
    /// was persisted
    pub async fn upsert_listed(&self, scope: &ScopeKey, record: R) -> StorageResult<(R, Vec<R>)> {
        let mut records = self.list(scope).await?;
        let stored = apply_upsert(&mut records, record, Utc::now());
        write_list(&self.store, scope, &records).await?;

        info!("Saved record {} in {}", stored.id(), scope);
        Ok((stored, records))
    }

    /// Filter out the record with `id`. Absent ids leave the list unchanged
    pub async fn remove(&self, scope: &ScopeKey, id: &str) -> StorageResult<()> {
        self.remove_listed(scope, id).await.map(|_| ())
    }

    /// Same as [`RecordStore::remove`], also returning the persisted list
    pub async fn remove_listed(&self, scope: &ScopeKey, id: &str) -> StorageResult<Vec<R>> {
        let mut records = self.list(scope).await?;
        apply_remove(&mut records, id);
        write_list(&self.store, scope, &records).await?;

        info!("Removed record {} from {}", id, scope);
        Ok(records)
    }
}

/// In-place upsert on an already loaded list
pub fn apply_upsert<R: Record>(records: &mut Vec<R>, mut record: R, now: DateTime<Utc>) -> R {
    if let Some(existing) = records.iter_mut().find(|r| r.id() == record.id()) {
        *existing = record.clone();
        return record;
    }

    let id = timestamp_id(now, |candidate| records.iter().any(|r| r.id() == candidate));
    record.assign_identity(id, now);
    records.push(record.clone());
    record
}

/// In-place removal on an already loaded list
pub fn apply_remove<R: Record>(records: &mut Vec<R>, id: &str) {
    records.retain(|r| r.id() != id);
}
