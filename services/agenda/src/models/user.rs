//! User model and related functionality

use std::fmt;

use chrono::{DateTime, Utc};
use common::Record;
use serde::{Deserialize, Serialize};

/// Timestamp-derived user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User entity, as persisted under `@users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
}

impl Record for User {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn assign_identity(&mut self, id: String, _created_at: DateTime<Utc>) {
        self.id = UserId(id);
    }
}

/// Registration form payload
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Repeated password, when the form asks for one
    pub confirm_password: Option<String>,
}

/// User login credentials
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
