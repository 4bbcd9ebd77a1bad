//! Product data structures
//!
//! Wire field names follow the remote API (`_id`, `imageUrl`,
//! `createdAt`); the Rust side uses conventional names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub seller: Seller,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One page of the listing. Pagination metadata is optional on the
/// wire; an envelope carrying only `data` still parses.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Client-side input for create/update, validated before any network
/// call.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Local path of an image to upload alongside the fields.
    pub image: Option<PathBuf>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            image: None,
        }
    }

    pub fn with_image(mut self, image: Option<PathBuf>) -> Self {
        self.image = image;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Validation(
                "Product name is required".to_string(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(CatalogError::Validation(
                "Description is required".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(CatalogError::Validation(
                "Price must be a positive number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Content type for an image upload, inferred from the file extension.
pub(crate) fn image_content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
