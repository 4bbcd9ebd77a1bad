//! SOUK Product Catalog
//!
//! Client for the marketplace product API: paginated listing, fetch,
//! create/update with multipart image upload, delete. Shares the
//! session's transport, so listing works anonymously and mutations
//! carry the bearer token; authorization decisions stay on the remote.

mod client;
mod error;
mod product;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use product::{Product, ProductDraft, ProductPage, Seller};

pub type Result<T> = std::result::Result<T, CatalogError>;
