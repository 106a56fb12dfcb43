//! Personal agenda: accounts, sessions and per-user event lists persisted in
//! key-value local storage.

pub mod agenda;
pub mod cli;
pub mod error;
pub mod form;
pub mod identity;
pub mod models;
pub mod presenter;
pub mod repositories;
pub mod session;
pub mod validation;

pub use agenda::Agenda;
pub use error::{AgendaError, AgendaResult};
pub use form::EventForm;
pub use identity::IdentityStore;
