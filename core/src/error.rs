//! Error types for the pet record client.
//!
//! # Design
//! The server answers failures with a `{message, error}` body; when it does,
//! the parsed fields land in `Server` so screens can show `message`
//! verbatim. Any other unexpected status keeps the raw body in `HttpError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 (strict not-found mode).
    #[error("resource not found")]
    NotFound,

    /// The server reported a failure with its usual `{message, error}` body.
    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        message: String,
        error: Option<String>,
    },

    /// A non-success status whose body was not the usual error shape.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never completed (connection refused, reset, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// The server-provided message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => Some(message),
            _ => None,
        }
    }
}
