//! Database models
//!
//! Rust structs representing database entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Sentinel id for an entry that has not been persisted yet. Inserts bind
/// NULL in its place so SQLite assigns the real id.
pub const UNSAVED_ENTRY_ID: i64 = 0;

/// One diary record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Resolved place name (city), if the user attached one
    pub location: Option<String>,
    /// Opaque reference to a captured image
    pub photo_uri: Option<String>,
    /// Opaque reference to a recorded audio note
    pub audio_uri: Option<String>,
    /// Creation/last-save instant in epoch milliseconds, set at save time
    pub timestamp: i64,
}

impl Entry {
    /// True if this entry has never been persisted.
    pub fn is_unsaved(&self) -> bool {
        self.id == UNSAVED_ENTRY_ID
    }

    /// The save instant as a chrono timestamp.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
