//! SOUK Storage Layer
//!
//! SQLite-based persistence for all client-side state: the persisted
//! session record and user preferences. All writes are transactional.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
