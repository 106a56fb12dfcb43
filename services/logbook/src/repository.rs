//! Media repository: one global list of captured entries

use common::{KeyValueStore, RecordStore, ScopeKey};

use crate::error::LogbookResult;
use crate::models::MediaEntry;

pub const MEDIA_KEY: &str = "capturedMedia";

fn media_key() -> ScopeKey {
    ScopeKey::new(MEDIA_KEY)
}

#[derive(Clone)]
pub struct MediaRepository<S> {
    records: RecordStore<S, MediaEntry>,
}

impl<S: KeyValueStore> MediaRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    /// All entries, oldest first
    pub async fn list(&self) -> LogbookResult<Vec<MediaEntry>> {
        Ok(self.records.list(&media_key()).await?)
    }

    /// Insert or replace an entry; returns it with the full persisted list
    pub async fn upsert(&self, entry: MediaEntry) -> LogbookResult<(MediaEntry, Vec<MediaEntry>)> {
        Ok(self.records.upsert_listed(&media_key(), entry).await?)
    }

    /// Remove an entry; returns the full persisted list
    pub async fn remove(&self, id: &str) -> LogbookResult<Vec<MediaEntry>> {
        Ok(self.records.remove_listed(&media_key(), id).await?)
    }
}
