//! Common library for the agenda and logbook applications
//!
//! This crate provides the functionality both applications share: key-value
//! local storage, the list-per-scope record store built on it, ordered form
//! validation, storage configuration and the error taxonomy.
//!
//! ```rust,no_run
//! use common::config::StorageConfig;
//! use common::storage::FileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StorageConfig::load("agenda")?;
//!     let store = FileStore::from_config(&config).await?;
//!     println!("Storing records under {}", store.root().display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod records;
pub mod storage;
pub mod validation;

pub use error::{Notification, NotificationKind, StorageError, StorageResult, ValidationError};
pub use records::{Record, RecordStore, ScopeKey};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

