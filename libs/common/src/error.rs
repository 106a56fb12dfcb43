//! Custom error types for the common library
//!
//! This module defines the storage and validation errors shared by both
//! applications, and the notification a user sees when an action fails.

use std::io;

use thiserror::Error;

/// Custom error type for key-value storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the blob behind a key failed
    #[error("Storage I/O error on key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// A persisted blob could not be encoded or decoded
    #[error("Storage serialization error on key `{key}`: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Storage configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    pub(crate) fn io(key: &str, source: io::Error) -> Self {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn serialization(key: &str, source: serde_json::Error) -> Self {
        StorageError::Serialization {
            key: key.to_string(),
            source,
        }
    }
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// A user input rejected by a named validation rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the first rule the input violated
    pub rule: &'static str,
    /// Message shown to the user
    pub message: String,
}

/// How a notification is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Dismissible inline message
    Toast,
    /// Blocking dialog
    Alert,
}

/// User-visible rendering of a failed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn toast(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Toast,
            message: message.into(),
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Alert,
            message: message.into(),
        }
    }
}

impl From<&StorageError> for Notification {
    fn from(_: &StorageError) -> Self {
        Notification::toast("Could not access local storage, please try again")
    }
}

impl From<&ValidationError> for Notification {
    fn from(error: &ValidationError) -> Self {
        Notification::toast(error.message.clone())
    }
}
