//! Catalog error types

use souk_http::HttpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Bad input, caught before any network call.
    #[error("Invalid product: {0}")]
    Validation(String),

    /// The remote understood the request and refused it.
    #[error("Marketplace rejected request: {0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HttpError> for CatalogError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Status { status, message } if status < 500 => {
                CatalogError::Rejected(message)
            }
            HttpError::Status { status, message } => {
                CatalogError::Transport(format!("server error (HTTP {status}): {message}"))
            }
            HttpError::Decode(detail) => CatalogError::Decode(detail),
            HttpError::Transport(e) => CatalogError::Transport(e.to_string()),
            HttpError::InvalidUrl(e) => CatalogError::Transport(e),
        }
    }
}
