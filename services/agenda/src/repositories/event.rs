//! Event repository: one event list per user

use common::{KeyValueStore, RecordStore, ScopeKey};

use crate::error::AgendaResult;
use crate::models::{Event, UserId};

/// Scope key holding the events of `user_id`
pub fn events_key(user_id: &UserId) -> ScopeKey {
    ScopeKey::new(format!("@events_{}", user_id))
}

/// Event repository
#[derive(Clone)]
pub struct EventRepository<S> {
    records: RecordStore<S, Event>,
}

impl<S: KeyValueStore> EventRepository<S> {
    /// Create a new event repository
    pub fn new(store: S) -> Self {
        Self {
            records: RecordStore::new(store),
        }
    }

    /// Events of a user, in stored order
    pub async fn list(&self, user_id: &UserId) -> AgendaResult<Vec<Event>> {
        Ok(self.records.list(&events_key(user_id)).await?)
    }

    /// Insert or replace an event; returns it with the full persisted list
    pub async fn upsert(&self, user_id: &UserId, event: Event) -> AgendaResult<(Event, Vec<Event>)> {
        Ok(self.records.upsert_listed(&events_key(user_id), event).await?)
    }

    /// Remove an event; returns the full persisted list
    pub async fn remove(&self, user_id: &UserId, id: &str) -> AgendaResult<Vec<Event>> {
        Ok(self.records.remove_listed(&events_key(user_id), id).await?)
    }
}
