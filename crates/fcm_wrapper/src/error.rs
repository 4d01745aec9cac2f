// --- File: crates/fcm_wrapper/src/error.rs ---
use thiserror::Error;

/// Errors raised when a [`Message`](crate::message::Message) is exported or parsed.
#[derive(Error, Debug)]
pub enum MessageError {
    /// No target, or more than one target, was selected
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Neither `data` nor `notification` is set
    #[error("Invalid payload: you must set the data or notification field of the message")]
    InvalidPayload,

    /// The JSON text could not be produced or parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while exchanging a service account document for an access token.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The document is not a usable service account key
    #[error("Invalid service account document: {0}")]
    Parse(String),

    /// The token endpoint could not be reached
    #[error("Token request failed: {0}")]
    Network(String),

    /// The identity provider refused the assertion or returned no token
    #[error("Token request rejected: {0}")]
    Rejected(String),

    /// The key file or the local runtime could not be set up
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking exchange was called from a thread that already drives an async runtime
    #[error("Blocking token exchange called from inside an async runtime; use obtain_access_token instead")]
    InsideRuntime,

    /// The configuration names no key file
    #[error("Missing key_path in FcmConfig")]
    MissingKeyPath,
}

/// Errors returned by [`prepare_send`](crate::client::prepare_send).
#[derive(Error, Debug)]
pub enum FcmError {
    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    Config(String),
}
