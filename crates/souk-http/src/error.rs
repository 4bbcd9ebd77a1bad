//! Transport error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The remote answered with a non-success status. `message` is the
    /// server's `{message}` body when it sent one, otherwise the
    /// canonical reason phrase.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl HttpError {
    /// Status code of a remote rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
