//! Digital diary core
//!
//! PIN-protected diary entries with optional photo, audio note and
//! geolocation. The crate owns persistence, the live entry query, the
//! authentication gate and the editing-session state machine; cameras,
//! microphones and location services stay behind the collaborator traits
//! in [`media`] for the host application to implement.

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod media;
pub mod preferences;
pub mod services;

pub use app::DiaryApp;
pub use database::{Entry, EntryRepository, EntryStore};
pub use error::{AppError, Result};
pub use services::{AuthGate, AuthState, EntryDetailSession, EntryListViewState, SaveOutcome};
