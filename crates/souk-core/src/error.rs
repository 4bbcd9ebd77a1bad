//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] souk_storage::StorageError),

    #[error("Transport error: {0}")]
    Http(#[from] souk_http::HttpError),

    #[error("Session error: {0}")]
    Session(#[from] souk_session::SessionError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] souk_catalog::CatalogError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
