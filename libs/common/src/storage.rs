//! Key-value local storage
//!
//! Every persisted list lives as one string blob under one key. Backends
//! only need to get, set and remove whole blobs; there is no partial update.

use std::future::Future;

use crate::error::StorageResult;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Asynchronous key-value blob store
pub trait KeyValueStore: Send + Sync {
    /// Get the blob stored under `key`, if any
    fn get(&self, key: &str) -> impl Future<Output = StorageResult<Option<String>>> + Send;

    /// Overwrite the blob stored under `key`
    fn set(&self, key: &str, value: &str) -> impl Future<Output = StorageResult<()>> + Send;

    /// Delete `key`. Deleting an absent key is not an error
    fn remove(&self, key: &str) -> impl Future<Output = StorageResult<()>> + Send;

    /// Delete every key
    fn clear(&self) -> impl Future<Output = StorageResult<()>> + Send;
}
