use async_trait::async_trait;
use serde_json::Value;

use crate::application::RelayClient;
use crate::domain::{ChatReply, ChatRequest, DomainError};

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000";
pub const CHAT_PATH: &str = "/api/chat";
const GENERIC_FAILURE: &str = "Request failed";

/// Talks to a running relay over HTTP.
pub struct HttpRelayClient {
    client: reqwest::Client,
    url: String,
}

impl HttpRelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            url: format!("{}{CHAT_PATH}", base.trim_end_matches('/')),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The reason to show for a non-success relay response.
    ///
    /// Relay errors carry a string `error`; upstream passthrough bodies from
    /// Gemini carry an object with a `message`.
    fn failure_reason(body: &Value) -> String {
        let error = body.get("error");
        error
            .and_then(Value::as_str)
            .or_else(|| error.and_then(|e| e.get("message")).and_then(Value::as_str))
            .filter(|reason| !reason.is_empty())
            .unwrap_or(GENERIC_FAILURE)
            .to_string()
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::network(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::decode(e.to_string()))?;

        if !status.is_success() {
            return Err(DomainError::relay(Self::failure_reason(&body)));
        }

        let reply: ChatReply =
            serde_json::from_value(body).map_err(|e| DomainError::decode(e.to_string()))?;
        Ok(reply.reply)
    }
}
