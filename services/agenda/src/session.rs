//! Session management over the key-value store
//!
//! The session is a single scalar: the id of the logged-in user, stored raw
//! (not JSON encoded) under `@user_id`.

use common::KeyValueStore;
use tracing::info;

use crate::error::AgendaResult;
use crate::models::UserId;

/// Key holding the active user id
pub const SESSION_KEY: &str = "@user_id";

/// Session manager for the active user
#[derive(Clone)]
pub struct SessionManager<S> {
    store: S,
}

impl<S: KeyValueStore> SessionManager<S> {
    /// Create a new session manager
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Make `user_id` the active user
    pub async fn create_session(&self, user_id: &UserId) -> AgendaResult<()> {
        info!("Creating session for user: {}", user_id);
        self.store.set(SESSION_KEY, user_id.as_str()).await?;
        Ok(())
    }

    /// Active user id, if any
    pub async fn get_session(&self) -> AgendaResult<Option<UserId>> {
        let user_id = self.store.get(SESSION_KEY).await?;
        Ok(user_id.filter(|id| !id.is_empty()).map(UserId::new))
    }

    /// Forget the active user
    pub async fn delete_session(&self) -> AgendaResult<()> {
        info!("Deleting session");
        self.store.remove(SESSION_KEY).await?;
        Ok(())
    }
}
