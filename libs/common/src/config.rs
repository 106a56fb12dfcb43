//! Storage configuration
//!
//! Settings are layered: built-in defaults, then an optional `<app>.toml`
//! in the working directory, then `<APP>_*` environment variables.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{StorageError, StorageResult};

/// Storage and logging configuration for one application
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted blobs
    pub data_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl StorageConfig {
    /// Load the configuration of application `app`
    ///
    /// # Environment Variables
    /// - `<APP>_DATA_DIR`: data directory (default: `./.<app>`)
    /// - `<APP>_LOG_LEVEL`: log level (default: `info`)
    pub fn load(app: &str) -> StorageResult<Self> {
        let settings = Config::builder()
            .set_default("data_dir", format!(".{}", app))
            .and_then(|builder| builder.set_default("log_level", "info"))
            .map_err(|e| StorageError::Configuration(e.to_string()))?
            .add_source(File::with_name(app).required(false))
            .add_source(Environment::with_prefix(&app.to_uppercase()))
            .build()
            .map_err(|e| StorageError::Configuration(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| StorageError::Configuration(e.to_string()))
    }
}
