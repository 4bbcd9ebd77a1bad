//! HTTP client with bearer attachment

use parking_lot::RwLock;
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::error::HttpError;
use crate::Result;

/// Optional error body shape used by the remote API: `{ "message": ... }`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
    /// Shared bearer slot. Clones of this client see the same token.
    bearer: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            bearer: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_bearer(&self, token: String) {
        *self.bearer.write() = Some(token);
    }

    pub fn clear_bearer(&self) {
        *self.bearer.write() = None;
    }

    pub fn bearer(&self) -> Option<String> {
        self.bearer.read().clone()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.bearer.read().as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let req = self.authorize(self.http.get(self.endpoint(path)?).query(query));
        Self::decode_json(req.send().await?).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let req = self.authorize(self.http.post(self.endpoint(path)?).json(body));
        Self::decode_json(req.send().await?).await
    }

    /// POST where only the status matters; the response body is dropped.
    pub async fn post_no_content<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let req = self.authorize(self.http.post(self.endpoint(path)?).json(body));
        Self::check_status(req.send().await?).await?;
        Ok(())
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let req = self.authorize(self.http.post(self.endpoint(path)?).multipart(form));
        Self::decode_json(req.send().await?).await
    }

    pub async fn patch_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let req = self.authorize(self.http.patch(self.endpoint(path)?).multipart(form));
        Self::decode_json(req.send().await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let req = self.authorize(self.http.delete(self.endpoint(path)?));
        Self::check_status(req.send().await?).await?;
        Ok(())
    }

    async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let resp = Self::check_status(resp).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| HttpError::Decode(e.to_string()))
    }

    async fn check_status(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        tracing::debug!(status = status.as_u16(), %message, "Remote rejected request");

        Err(HttpError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
