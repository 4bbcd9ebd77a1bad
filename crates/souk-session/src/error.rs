//! Session error types

use souk_http::HttpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Malformed credentials, caught before any network call.
    #[error("Invalid credentials: {0}")]
    Validation(String),

    /// The remote rejected the credentials or the session.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network unreachable or the server itself fell over.
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(#[from] souk_storage::StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<HttpError> for SessionError {
    fn from(err: HttpError) -> Self {
        match err {
            // 4xx: the remote understood us and said no.
            HttpError::Status { status, message } if status < 500 => SessionError::Auth(message),
            // 5xx: reachable but broken; surface generically.
            HttpError::Status { status, message } => {
                SessionError::Transport(format!("server error (HTTP {status}): {message}"))
            }
            // A 2xx body missing required fields is a bad auth payload,
            // not a transport problem.
            HttpError::Decode(detail) => SessionError::Auth(format!(
                "authentication endpoint returned an invalid response: {detail}"
            )),
            HttpError::Transport(e) => SessionError::Transport(e.to_string()),
            HttpError::InvalidUrl(e) => SessionError::Transport(e),
        }
    }
}
