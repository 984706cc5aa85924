//! Services module
//!
//! The state holders the UI drives: the authentication gate, the entry
//! list view-state, and the per-screen entry detail session.

pub mod auth;
pub mod entry_list;
pub mod session;

pub use auth::{AuthGate, AuthState};
pub use entry_list::EntryListViewState;
pub use session::{EntryDetailSession, SaveOutcome};
