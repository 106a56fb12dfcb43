//! Agenda screen state
//!
//! Owns the in-memory replica of the active user's events. The replica is
//! replaced only after the new list has been persisted, so a failed write
//! leaves it as it was.

use chrono::{DateTime, TimeZone};
use common::KeyValueStore;
use tracing::{error, info};

use crate::error::{AgendaError, AgendaResult};
use crate::form::EventForm;
use crate::models::{Event, UserId};
use crate::presenter::{AgendaItem, partition};
use crate::repositories::EventRepository;
use crate::session::SessionManager;

/// Event list of the logged-in user
pub struct Agenda<S> {
    repository: EventRepository<S>,
    user_id: Option<UserId>,
    events: Vec<Event>,
}

impl<S: KeyValueStore> Agenda<S> {
    /// Rehydrate the agenda of whoever holds the session
    ///
    /// Without a session the agenda is empty and read-only.
    pub async fn load(repository: EventRepository<S>, sessions: &SessionManager<S>) -> AgendaResult<Self> {
        let user_id = sessions.get_session().await?;
        let events = match &user_id {
            Some(user_id) => repository.list(user_id).await.inspect_err(|e| {
                error!("Failed to load events: {}", e);
            })?,
            None => Vec::new(),
        };

        Ok(Self {
            repository,
            user_id,
            events,
        })
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Events in stored order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn find(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events in display order relative to `now`
    pub fn items<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<AgendaItem<'_>> {
        partition(&self.events, now)
    }

    /// Form prefilled with the event `id`
    pub fn edit_form(&self, id: &str) -> AgendaResult<EventForm> {
        self.find(id)
            .map(EventForm::for_event)
            .ok_or_else(|| AgendaError::EventNotFound(id.to_string()))
    }

    fn require_user(&self) -> AgendaResult<&UserId> {
        self.user_id.as_ref().ok_or(AgendaError::NotAuthenticated)
    }

    /// Validate the form and create or update its event
    pub async fn save(&mut self, form: &EventForm) -> AgendaResult<Event> {
        let user_id = self.require_user()?.clone();
        let event = form.submit()?;

        let (stored, events) = self
            .repository
            .upsert(&user_id, event)
            .await
            .inspect_err(|e| error!("Failed to save event: {}", e))?;

        info!(
            "{} event {}",
            if form.is_editing() { "Updated" } else { "Created" },
            stored.id
        );
        self.events = events;
        Ok(stored)
    }

    /// Delete the event `id`; deleting an absent id is a no-op
    pub async fn delete(&mut self, id: &str) -> AgendaResult<()> {
        let user_id = self.require_user()?.clone();

        let events = self
            .repository
            .remove(&user_id, id)
            .await
            .inspect_err(|e| error!("Failed to delete event: {}", e))?;

        self.events = events;
        Ok(())
    }
}
