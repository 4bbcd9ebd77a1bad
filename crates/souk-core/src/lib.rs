//! SOUK Core
//!
//! Central coordination layer for the SOUK marketplace client. Builds
//! the storage and transport collaborators once and passes them into
//! the managers explicitly; there is no ambient global session.

mod config;
mod error;
mod marketplace;

pub use config::Config;
pub use error::CoreError;
pub use marketplace::Marketplace;

// Re-export core components
pub use souk_catalog::{CatalogClient, CatalogError, Product, ProductDraft, ProductPage, Seller};
pub use souk_http::{HttpClient, HttpError};
pub use souk_session::{Credentials, Registration, Session, SessionError, SessionManager, User};
pub use souk_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
