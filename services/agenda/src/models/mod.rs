//! Agenda models

pub mod event;
pub mod user;

// Re-export for convenience
pub use event::{Event, EventCategory};
pub use user::{LoginCredentials, Registration, User, UserId};
