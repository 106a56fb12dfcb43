//! Visual logbook: photos and videos tagged with where they were taken,
//! persisted as one list in key-value local storage.

pub mod capture;
pub mod cli;
pub mod device;
pub mod error;
pub mod gallery;
pub mod models;
pub mod repository;

pub use capture::{CaptureFlow, PendingCapture};
pub use error::{LogbookError, LogbookResult};
pub use gallery::Gallery;
pub use repository::MediaRepository;
