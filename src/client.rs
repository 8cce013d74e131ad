//! HTTP client for a running Flockbook server, used by the CLI.
//!
//! The base URL defaults to `http://127.0.0.1:3000/api/v1` and can be set with
//! `FLOCKBOOK_URL`.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::models::DashboardSummary;

/// Default URL for a local server.
pub const DEFAULT_URL: &str = "http://127.0.0.1:3000/api/v1";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct FlockClient {
    base_url: String,
    client: Client,
}

impl FlockClient {
    /// Create client from `FLOCKBOOK_URL`, falling back to [`DEFAULT_URL`].
    pub fn from_env() -> Self {
        let base_url = std::env::var("FLOCKBOOK_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_for(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(body),
            _ => ClientError::Server(format!("{}: {}", status, body)),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn get_text(&self, path: &str) -> Result<String, ClientError> {
        let response = self.client.get(self.url(path)).send().await?;
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get_json("/health").await
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, ClientError> {
        self.get_json("/dashboard").await
    }

    /// ASCII depletion chart for the feed plan entry at `index`.
    pub async fn feed_chart(&self, index: usize) -> Result<String, ClientError> {
        self.get_text(&format!("/feed/{}/chart", index)).await
    }
}
