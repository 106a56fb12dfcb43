//! Repositories over the key-value store

pub mod event;
pub mod user;

pub use event::EventRepository;
pub use user::UserRepository;
