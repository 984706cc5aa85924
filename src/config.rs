//! Application configuration constants
//!
//! Central location for all configuration constants, validation boundaries
//! and user-visible message strings used throughout the diary core.

// ===== Authentication =====

/// Required PIN length in characters (decimal digits only)
pub const PIN_LENGTH: usize = 4;

/// Preference key the PIN is stored under
pub const PIN_KEY: &str = "app_pin";

/// Message shown when PIN setup fails (wrong length, non-digit, or
/// confirmation mismatch)
pub const PIN_MISMATCH_MESSAGE: &str = "PIN mismatch";

/// Message shown when an entered PIN does not match the stored one
pub const INCORRECT_PIN_MESSAGE: &str = "Incorrect PIN";

// ===== Storage =====

/// Database file name inside the application data directory
pub const DB_FILE_NAME: &str = "diary.db";

/// Preference file name inside the application data directory
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Subdirectory for recorded audio notes
pub const AUDIO_CACHE_DIR: &str = "audio";

/// File name prefix and extension for recorded audio notes
pub const AUDIO_FILE_PREFIX: &str = "audio_";
pub const AUDIO_FILE_EXT: &str = "m4a";

// ===== Live query =====

/// Capacity of the entry-snapshot broadcast channel. A subscriber that falls
/// further behind than this re-lists from the store instead of replaying.
pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;

// ===== Validation messages =====

/// Field error shown when the entry title is blank
pub const TITLE_REQUIRED_MESSAGE: &str = "Title cannot be empty";

/// Field error shown when the entry content is blank
pub const CONTENT_REQUIRED_MESSAGE: &str = "Content cannot be empty";
