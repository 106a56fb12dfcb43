//! Custom error types for the logbook service

use std::fmt;

use common::{Notification, StorageError};
use thiserror::Error;

/// Device capability guarded by a permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Camera,
    Location,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Camera => "camera",
            Capability::Location => "location",
        })
    }
}

/// Failure reported by a device capability
#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("{0} is unavailable: {1}")]
    Unavailable(Capability, String),

    #[error("Failed to import {path}: {source}")]
    Import {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Custom error type for the logbook service
#[derive(Error, Debug)]
pub enum LogbookError {
    /// The user refused a permission the action cannot do without
    #[error("Permission to use the {0} was denied")]
    PermissionDenied(Capability),

    /// A device capability failed
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Confirm or cancel without a captured asset
    #[error("There is no capture waiting to be saved")]
    NothingPending,

    #[error("Media entry not found: {0}")]
    MediaNotFound(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl LogbookError {
    /// Notification shown to the user for this error
    pub fn notification(&self) -> Notification {
        match self {
            LogbookError::PermissionDenied(_) => Notification::alert(self.to_string()),
            LogbookError::Device(e) => Notification::alert(format!(
                "Something went wrong while capturing: {}",
                e
            )),
            LogbookError::Storage(e) => Notification::from(e),
            other => Notification::toast(other.to_string()),
        }
    }
}

/// Type alias for logbook results
pub type LogbookResult<T> = Result<T, LogbookError>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::NotificationKind;

    #[test]
    fn test_permission_denial_is_an_alert() {
        let notification = LogbookError::PermissionDenied(Capability::Camera).notification();
        assert_eq!(notification.kind, NotificationKind::Alert);
        assert_eq!(notification.message, "Permission to use the camera was denied");
    }

    #[test]
    fn test_missing_entry_is_a_toast() {
        let notification = LogbookError::MediaNotFound("42".to_string()).notification();
        assert_eq!(notification.kind, NotificationKind::Toast);
        assert_eq!(notification.message, "Media entry not found: 42");
    }
}
