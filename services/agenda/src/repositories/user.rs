//! User repository for storage operations

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use common::{KeyValueStore, RecordStore, ScopeKey};
use tracing::info;

use crate::error::{AgendaError, AgendaResult};
use crate::models::{User, UserId};

/// Key holding the list of registered users
pub const USERS_KEY: &str = "@users";

/// User repository
#[derive(Clone)]
pub struct UserRepository<S> {
    records: RecordStore<S, User>,
    scope: ScopeKey,
}

impl<S: KeyValueStore> UserRepository<S> {
    /// Create a new user repository
    pub fn new(store: S) -> Self {
        Self {
            records: RecordStore::new(store),
            scope: ScopeKey::new(USERS_KEY),
        }
    }

    /// Create a new user, hashing the password
    pub async fn create(&self, name: &str, email: &str, password: &str) -> AgendaResult<User> {
        info!("Creating new user: {}", email);

        // Hash the password
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AgendaError::PasswordHash(e.to_string()))?
            .to_string();

        let user = User {
            id: UserId::new(String::new()),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        };

        Ok(self.records.upsert(&self.scope, user).await?)
    }

    /// Get all users, in registration order
    pub async fn get_all(&self) -> AgendaResult<Vec<User>> {
        Ok(self.records.list(&self.scope).await?)
    }

    /// Find a user by email, compared exactly
    pub async fn find_by_email(&self, email: &str) -> AgendaResult<Option<User>> {
        info!("Finding user by email: {}", email);

        let users = self.get_all().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: &UserId) -> AgendaResult<Option<User>> {
        info!("Finding user by ID: {}", id);

        let users = self.get_all().await?;
        Ok(users.into_iter().find(|u| &u.id == id))
    }

    /// Find the first user whose email and password both match
    pub async fn find_by_credentials(&self, email: &str, password: &str) -> AgendaResult<Option<User>> {
        let users = self.get_all().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email == email && verify_password(u, password)))
    }
}

/// Verify a user's password
///
/// Hashes are Argon2 PHC strings. A stored value that does not parse as one
/// was written in plain text and is compared as-is.
pub fn verify_password(user: &User, password: &str) -> bool {
    match PasswordHash::new(&user.password_hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => user.password_hash == password,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MemoryStore;

    #[tokio::test]
    async fn test_create_hashes_password() -> AgendaResult<()> {
        let repository = UserRepository::new(MemoryStore::new());
        let user = repository.create("Ana", "a@b.com", "secret1").await?;

        assert!(!user.id.as_str().is_empty());
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$argon2"));
        assert!(verify_password(&user, "secret1"));
        assert!(!verify_password(&user, "secret2"));
        Ok(())
    }

    #[tokio::test]
    async fn test_plain_text_passwords_still_verify() -> AgendaResult<()> {
        let store = MemoryStore::new();
        store
            .set(
                USERS_KEY,
                r#"[{"id":"1700000000000","name":"Ana","email":"a@b.com","password":"secret1"}]"#,
            )
            .await?;
        let repository = UserRepository::new(store);

        let found = repository.find_by_credentials("a@b.com", "secret1").await?;
        assert_eq!(found.map(|u| u.name), Some("Ana".to_string()));
        assert!(repository.find_by_credentials("a@b.com", "secret").await?.is_none());
        assert!(repository.find_by_credentials("A@b.com", "secret1").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_id_and_email() -> AgendaResult<()> {
        let repository = UserRepository::new(MemoryStore::new());
        let ana = repository.create("Ana", "a@b.com", "secret1").await?;
        let luis = repository.create("Luis", "l@b.com", "secret2").await?;

        assert_eq!(repository.find_by_id(&luis.id).await?, Some(luis.clone()));
        assert_eq!(repository.find_by_email("a@b.com").await?, Some(ana.clone()));
        assert_eq!(repository.find_by_email("x@b.com").await?, None);
        assert_eq!(repository.get_all().await?, vec![ana, luis]);
        Ok(())
    }
}
