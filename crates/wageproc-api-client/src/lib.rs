//! HTTP client for the Quick Wage Processor server.
//!
//! Provides a minimal client over the four endpoints the workflows consume
//! (credential check, PIN reminder, input registration, file upload). The
//! cookie store is enabled so every request carries the server's session
//! cookies.

pub mod api;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use wageproc_core::{ClientError, Config};

/// HTTP client for the Quick Wage Processor API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.http_timeout_secs)
    }

    /// Create client from environment: WAGEPROC_API_URL and friends.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body; returns the status plus the best-effort-decoded
    /// response body. An undecodable body becomes an empty object and the
    /// status drives the outcome — the only silent fallback in the client.
    async fn post_json_lenient(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(StatusCode, serde_json::Value), ClientError> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;

        Self::read_lenient(response).await
    }

    /// POST a multipart form; same lenient decode as `post_json_lenient`.
    async fn post_multipart_lenient(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(StatusCode, serde_json::Value), ClientError> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;

        Self::read_lenient(response).await
    }

    async fn read_lenient(
        response: reqwest::Response,
    ) -> Result<(StatusCode, serde_json::Value), ClientError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| ClientError::Network(err.to_string()))?;
        let body = serde_json::from_str(&text)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()));
        Ok((status, body))
    }
}

/// The server-supplied `error` field of a response body, when present.
fn body_error(body: &serde_json::Value) -> Option<String> {
    body.get("error")
        .and_then(|value| value.as_str())
        .map(|msg| msg.to_string())
}

/// The `success` flag of a response body; absent counts as false.
fn body_success(body: &serde_json::Value) -> bool {
    body.get("success")
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

pub use api::PayrollApi;
