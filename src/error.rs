use serde::Serialize;
use thiserror::Error;

/// Message shown whenever a write is attempted without embedded SQL support.
pub const UNAVAILABLE_MESSAGE: &str =
    "Database not available on this platform. Please use iOS or Android.";

/// Application-wide error type
///
/// Tauri v2 requires command errors to implement `Serialize`.
/// `thiserror` derives Display/Error and the manual impl below turns the
/// error into a plain string for the frontend.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{}", UNAVAILABLE_MESSAGE)]
    Unavailable,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    /// Identity provider failures are shown to the user verbatim.
    #[error("{0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

/// Serialised as a string when crossing into the frontend
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
