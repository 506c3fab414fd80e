use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::application::{GenerativeClient, UpstreamResponse};
use crate::domain::{DomainError, GenerateContentRequest, UpstreamTurn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_VERSION_PATH: &str = "/v1beta/models";

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// The API key is passed per call as the `key` query parameter, so one client
/// serves every relay request regardless of when the key was configured.
///
/// No timeout is set: a hung upstream call hangs the relay invocation that
/// issued it.
///
/// Override the defaults through the environment:
///
/// ```text
/// GEMINI_BASE_URL=https://generativelanguage.googleapis.com
/// GEMINI_MODEL=gemini-1.5-flash
/// ```
pub struct GeminiClient {
    client: reqwest::Client,
    model: String,
    /// Full endpoint URL, without the key.
    url: String,
}

impl GeminiClient {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        let model: String = model.into();
        let base: String = base_url.into();
        let url = format!(
            "{}{API_VERSION_PATH}/{model}:generateContent",
            base.trim_end_matches('/')
        );
        Self {
            client: reqwest::Client::new(),
            model,
            url,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable          | Default                                     |
    /// |-------------------|---------------------------------------------|
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
    /// | `GEMINI_MODEL`    | `gemini-1.5-flash`                          |
    pub fn from_env() -> Self {
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(model, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        api_key: &str,
        contents: &[UpstreamTurn],
    ) -> Result<UpstreamResponse, DomainError> {
        let request = GenerateContentRequest { contents };

        debug!("POST {} with {} turns", self.url, contents.len());

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the key; keep it out of the message.
                DomainError::network(format!("GeminiClient: request failed: {}", e.without_url()))
            })?;

        let status = response.status().as_u16();
        let body: Value = response.json().await.map_err(|e| {
            DomainError::decode(format!(
                "GeminiClient: response body (status {status}) is not JSON: {}",
                e.without_url()
            ))
        })?;

        Ok(UpstreamResponse::new(status, body))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
