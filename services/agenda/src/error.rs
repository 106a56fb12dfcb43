//! Custom error types for the agenda service

use common::{Notification, StorageError, ValidationError};
use thiserror::Error;

/// Custom error type for the agenda service
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Form input rejected by a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Registration with an email that is already taken
    #[error("This email is already registered")]
    DuplicateEmail,

    /// No stored user matches the credentials
    #[error("Incorrect email or password")]
    Auth,

    /// An action needing a session ran without one
    #[error("You need to log in first")]
    NotAuthenticated,

    /// Editing an event id the agenda does not hold
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AgendaError {
    /// Notification shown to the user for this error
    pub fn notification(&self) -> Notification {
        match self {
            AgendaError::Validation(e) => Notification::from(e),
            AgendaError::Storage(e) => Notification::from(e),
            AgendaError::PasswordHash(_) => {
                Notification::toast("Something went wrong, please try again")
            }
            other => Notification::toast(other.to_string()),
        }
    }
}

/// Type alias for agenda results
pub type AgendaResult<T> = Result<T, AgendaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use common::NotificationKind;

    #[test]
    fn test_business_errors_show_their_message() {
        let notification = AgendaError::DuplicateEmail.notification();
        assert_eq!(notification.kind, NotificationKind::Toast);
        assert_eq!(notification.message, "This email is already registered");

        let validation = ValidationError {
            rule: "title_present",
            message: "Title is required".to_string(),
        };
        assert_eq!(
            AgendaError::from(validation).notification().message,
            "Title is required"
        );
    }
}
