//! Error types for the diary core
//!
//! All errors use thiserror for structured error handling. Every variant is
//! recoverable at the operation boundary; nothing here is fatal to the
//! process.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A platform capability (microphone, location) was not granted.
    #[error("Permission denied: {0}")]
    PermissionDenied(&'static str),

    /// Media capture or playback failure (recorder, player, camera, annotator).
    #[error("Media error: {0}")]
    Media(String),

    /// The single-shot location fix timed out or failed outright.
    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    /// PIN setup or verification failure.
    #[error("{0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
