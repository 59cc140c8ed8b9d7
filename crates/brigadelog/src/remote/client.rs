//! HTTP client for the brigade logistics service.
//!
//! Thin reqwest-based implementation of [`RemoteApi`]. Error responses are
//! reduced to one human-readable message, preferring a structured
//! `message`/`error` field from the payload and falling back to the raw
//! body or the status text.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::UserProfile;

use super::{
    BootRequest, BrigadeId, BrigadeRequest, BrigadeSummary, ClothingRequest, GloveRequest,
    PartRequest, RemoteApi, SupplyCategory, SupplyRequest,
};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: UserProfile,
}

/// HTTP implementation of [`RemoteApi`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from the API configuration and an optional bearer
    /// token from the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| Error::internal(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn post_json(&self, path: &str, body: &(impl Serialize + Sync)) -> Result<Value> {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(body)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;
        Self::read_json(url, response).await
    }

    async fn put_json(&self, path: &str, body: &(impl Serialize + Sync)) -> Result<Value> {
        let url = self.url(path);
        debug!("PUT {url}");
        let response = self
            .request(reqwest::Method::PUT, &url)
            .json(body)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;
        Self::read_json(url, response).await
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.clone(),
                source,
            })?;
        Self::check_status(response).await
    }

    /// Convert a non-success response into [`Error::Api`].
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::api(status.as_u16(), error_message(status, &body)))
    }

    async fn read_json(url: String, response: reqwest::Response) -> Result<Value> {
        let response = Self::check_status(response).await?;
        // An empty body (e.g. 204) is treated as null.
        let text = response
            .text()
            .await
            .map_err(|source| Error::Transport { url, source })?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Build the user-visible message for a failed call.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = payload.get(key).and_then(Value::as_str) {
                if !message.trim().is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}

#[async_trait]
impl RemoteApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<(String, UserProfile)> {
        let payload = self
            .post_json("auth/login", &LoginRequest { username, password })
            .await?;
        let response: LoginResponse = serde_json::from_value(payload)?;
        Ok((response.token, response.user))
    }

    async fn create_brigade(&self, profile: &BrigadeRequest) -> Result<Value> {
        self.post_json("brigades", profile).await
    }

    async fn update_brigade(&self, id: &BrigadeId, profile: &BrigadeRequest) -> Result<()> {
        self.put_json(&format!("brigades/{id}"), profile).await?;
        Ok(())
    }

    async fn add_clothing(&self, id: &BrigadeId, item: &ClothingRequest) -> Result<()> {
        self.post_json(&format!("brigades/{id}/clothing"), item)
            .await?;
        Ok(())
    }

    async fn add_boots(&self, id: &BrigadeId, item: &BootRequest) -> Result<()> {
        self.post_json(&format!("brigades/{id}/boots"), item).await?;
        Ok(())
    }

    async fn set_gloves(&self, id: &BrigadeId, item: &GloveRequest) -> Result<()> {
        self.post_json(&format!("brigades/{id}/gloves"), item)
            .await?;
        Ok(())
    }

    async fn add_supply(
        &self,
        id: &BrigadeId,
        category: SupplyCategory,
        item: &SupplyRequest,
    ) -> Result<()> {
        self.post_json(&format!("brigades/{id}/{}", category.path()), item)
            .await?;
        Ok(())
    }

    async fn add_part(&self, id: &BrigadeId, item: &PartRequest) -> Result<()> {
        self.post_json(&format!("brigades/{id}/parts"), item).await?;
        Ok(())
    }

    async fn list_brigades(&self) -> Result<Vec<BrigadeSummary>> {
        let url = self.url("brigades");
        let response = self.get("brigades").await?;
        let summaries = response
            .json()
            .await
            .map_err(|source| Error::Transport { url, source })?;
        Ok(summaries)
    }

    async fn fetch_summary(&self, id: &BrigadeId) -> Result<Vec<u8>> {
        let path = format!("brigades/{id}/summary");
        let url = self.url(&path);
        let response = self.get(&path).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| Error::Transport { url, source })?;
        Ok(bytes.to_vec())
    }
}
