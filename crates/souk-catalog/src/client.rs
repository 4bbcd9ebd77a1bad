//! Catalog client

use reqwest::multipart::{Form, Part};

use souk_http::{HttpClient, HttpError};

use crate::error::CatalogError;
use crate::product::{image_content_type, Product, ProductDraft, ProductPage};
use crate::Result;

#[derive(Clone)]
pub struct CatalogClient {
    http: HttpClient,
}

impl CatalogClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch one page of the listing. Both parameters are optional;
    /// the remote applies its own defaults when they are absent.
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<ProductPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let page: ProductPage = self.http.get_json("/products", &query).await?;

        tracing::debug!(count = page.data.len(), "Fetched product listing");

        Ok(page)
    }

    pub async fn get(&self, id: &str) -> Result<Product> {
        self.http
            .get_json(&format!("/products/{id}"), &[])
            .await
            .map_err(|e| not_found_or(e, id))
    }

    /// Create a product, uploading the optional image in the same
    /// multipart request.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product> {
        draft.validate()?;

        let form = build_form(draft).await?;
        let product: Product = self
            .http
            .post_multipart("/products/create-with-image", form)
            .await?;

        tracing::info!(product_id = %product.id, name = %product.name, "Created product");

        Ok(product)
    }

    pub async fn update(&self, id: &str, draft: &ProductDraft) -> Result<Product> {
        draft.validate()?;

        let form = build_form(draft).await?;
        let product: Product = self
            .http
            .patch_multipart(&format!("/products/{id}/with-image"), form)
            .await
            .map_err(|e| not_found_or(e, id))?;

        tracing::info!(product_id = %product.id, "Updated product");

        Ok(product)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.http
            .delete(&format!("/products/{id}"))
            .await
            .map_err(|e| not_found_or(e, id))?;

        tracing::info!(product_id = %id, "Deleted product");

        Ok(())
    }
}

fn not_found_or(err: HttpError, id: &str) -> CatalogError {
    match err {
        HttpError::Status { status: 404, .. } => CatalogError::NotFound(id.to_string()),
        other => other.into(),
    }
}

async fn build_form(draft: &ProductDraft) -> Result<Form> {
    let mut form = Form::new()
        .text("name", draft.name.clone())
        .text("description", draft.description.clone())
        .text("price", draft.price.to_string());

    if let Some(path) = &draft.image {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image")
            .to_string();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(image_content_type(path))
            .map_err(|e| CatalogError::Validation(format!("Invalid image content type: {e}")))?;
        form = form.part("image", part);
    }

    Ok(form)
}
