//! Integration tests for the storage components
//!
//! These tests verify that records persisted through the file store survive
//! reopening the store, and that blobs written by the mobile apps load.

use common::{FileStore, KeyValueStore, Record, RecordStore, ScopeKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry {
    id: String,
    label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
}

impl Record for Entry {
    fn id(&self) -> &str {
        &self.id
    }

    fn assign_identity(&mut self, id: String, created_at: chrono::DateTime<chrono::Utc>) {
        self.id = id;
        self.created_at = Some(created_at.to_rfc3339());
    }
}

/// Records written by one store instance are read back by a fresh one
#[tokio::test]
async fn test_records_survive_reopening() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let scope = ScopeKey::new("@events_1700000000000");

    let stored = {
        let records = RecordStore::new(FileStore::open(dir.path()).await?);
        records
            .upsert(
                &scope,
                Entry {
                    id: String::new(),
                    label: "Standup".to_string(),
                    created_at: None,
                },
            )
            .await?
    };

    let reopened: RecordStore<_, Entry> = RecordStore::new(FileStore::open(dir.path()).await?);
    let listed = reopened.list(&scope).await?;
    assert_eq!(listed, vec![stored]);

    Ok(())
}

/// A blob in the layout the mobile apps wrote is readable as-is
#[tokio::test]
async fn test_existing_blob_is_readable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::open(dir.path()).await?;
    store
        .set(
            "capturedMedia",
            r#"[{"id":"1","label":"a"},{"id":"2","label":"b","createdAt":"x"}]"#,
        )
        .await?;

    let records: RecordStore<_, Entry> = RecordStore::new(store);
    let listed = records.list(&ScopeKey::new("capturedMedia")).await?;
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[1].created_at.as_deref(), Some("x"));

    Ok(())
}
