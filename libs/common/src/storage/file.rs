//! File-backed key-value store
//!
//! Each key is one file in the data directory. Writes go to a temporary
//! sibling first and are renamed over the target.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use super::KeyValueStore;
use crate::config::StorageConfig;
use crate::error::{StorageError, StorageResult};

const BLOB_EXTENSION: &str = "json";

/// Key-value store persisting one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .await
            .map_err(|e| StorageError::io(&root.display().to_string(), e))?;

        info!("File store opened at {}", root.display());
        Ok(Self { root })
    }

    /// Open the store described by the configuration
    pub async fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        Self::open(&config.data_dir).await
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", encode_key(key), BLOB_EXTENSION))
    }
}

/// Percent-encode every byte outside `[A-Za-z0-9._-]`
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => {
                encoded.push(byte as char)
            }
            other => encoded.push_str(&format!("%{:02X}", other)),
        }
    }
    encoded
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let target = self.path_for(key);
        let staging = target.with_extension("tmp");

        fs::write(&staging, value)
            .await
            .map_err(|e| StorageError::io(key, e))?;
        fs::rename(&staging, &target)
            .await
            .map_err(|e| StorageError::io(key, e))?;

        debug!("Wrote {} bytes under key {}", value.len(), key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    async fn clear(&self) -> StorageResult<()> {
        let root = self.root.display().to_string();
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|e| StorageError::io(&root, e))?;

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(&root, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(BLOB_EXTENSION) {
                fs::remove_file(&path)
                    .await
                    .map_err(|e| StorageError::io(&path.display().to_string(), e))?;
                removed += 1;
            }
        }

        info!("Cleared {} keys from {}", removed, root);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_key() {
        assert_eq!(encode_key("@users"), "%40users");
        assert_eq!(encode_key("@events_1700000000000"), "%40events_1700000000000");
        assert_eq!(encode_key("capturedMedia"), "capturedMedia");
        assert_eq!(encode_key("a/b"), "a%2Fb");
    }

    #[tokio::test]
    async fn test_set_get_delete() -> StorageResult<()> {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::open(dir.path()).await?;

        assert_eq!(store.get("@user_id").await?, None);

        store.set("@user_id", "1700000000000").await?;
        assert_eq!(
            store.get("@user_id").await?,
            Some("1700000000000".to_string())
        );

        store.set("@user_id", "1700000000001").await?;
        assert_eq!(
            store.get("@user_id").await?,
            Some("1700000000001".to_string())
        );

        store.remove("@user_id").await?;
        store.remove("@user_id").await?;
        assert_eq!(store.get("@user_id").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_only_touches_blobs() -> StorageResult<()> {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::open(dir.path()).await?;
        std::fs::write(dir.path().join("notes.txt"), "keep me").expect("write");

        store.set("@users", "[]").await?;
        store.set("capturedMedia", "[]").await?;
        store.clear().await?;

        assert_eq!(store.get("@users").await?, None);
        assert_eq!(store.get("capturedMedia").await?, None);
        assert!(dir.path().join("notes.txt").exists());
        Ok(())
    }
}
