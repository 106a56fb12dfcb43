//! Identity store: registration, login and the active session

use common::KeyValueStore;
use common::validation::first_violation;
use tracing::{info, warn};

use crate::error::{AgendaError, AgendaResult};
use crate::models::{LoginCredentials, Registration, User, UserId};
use crate::repositories::UserRepository;
use crate::session::SessionManager;
use crate::validation::{LOGIN_RULES, REGISTRATION_RULES};

/// Accounts and the active session
#[derive(Clone)]
pub struct IdentityStore<S> {
    users: UserRepository<S>,
    sessions: SessionManager<S>,
}

impl<S: KeyValueStore + Clone> IdentityStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            sessions: SessionManager::new(store),
        }
    }
}

impl<S: KeyValueStore> IdentityStore<S> {
    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    /// Register a new account and log it in
    pub async fn register(&self, registration: &Registration) -> AgendaResult<UserId> {
        first_violation(REGISTRATION_RULES, registration)?;

        if self
            .users
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            warn!("Registration rejected, email already taken: {}", registration.email);
            return Err(AgendaError::DuplicateEmail);
        }

        let user = self
            .users
            .create(&registration.name, &registration.email, &registration.password)
            .await?;
        self.sessions.create_session(&user.id).await?;

        info!("Registered user {}", user.id);
        Ok(user.id)
    }

    /// Log in with email and password
    pub async fn login(&self, credentials: &LoginCredentials) -> AgendaResult<UserId> {
        first_violation(LOGIN_RULES, credentials)?;

        let user = self
            .users
            .find_by_credentials(&credentials.email, &credentials.password)
            .await?
            .ok_or_else(|| {
                warn!("Failed login for {}", credentials.email);
                AgendaError::Auth
            })?;

        self.sessions.create_session(&user.id).await?;
        Ok(user.id)
    }

    /// Clear the session
    pub async fn logout(&self) -> AgendaResult<()> {
        self.sessions.delete_session().await
    }

    /// Active user id, if any
    pub async fn current_session(&self) -> AgendaResult<Option<UserId>> {
        self.sessions.get_session().await
    }

    /// Profile of the active user
    ///
    /// A session pointing at a user that no longer exists is cleared.
    pub async fn current_user(&self) -> AgendaResult<Option<User>> {
        let Some(user_id) = self.sessions.get_session().await? else {
            return Ok(None);
        };

        match self.users.find_by_id(&user_id).await? {
            Some(user) => Ok(Some(user)),
            None => {
                warn!("Session user {} not found, clearing session", user_id);
                self.sessions.delete_session().await?;
                Ok(None)
            }
        }
    }

    /// All registered users
    pub async fn users(&self) -> AgendaResult<Vec<User>> {
        self.users.get_all().await
    }
}
