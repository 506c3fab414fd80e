use async_trait::async_trait;
use serde_json::json;

use crate::application::{GenerativeClient, UpstreamResponse};
use crate::domain::{DomainError, UpstreamTurn};

/// Offline stand-in for the Gemini API: answers every call with a 200 whose
/// single candidate echoes the last turn.
pub struct MockGenerativeClient;

impl MockGenerativeClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockGenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeClient for MockGenerativeClient {
    async fn generate(
        &self,
        _api_key: &str,
        contents: &[UpstreamTurn],
    ) -> Result<UpstreamResponse, DomainError> {
        let last = contents.last().map(UpstreamTurn::text).unwrap_or_default();
        let text = format!("You said: {last} ({} turns so far)", contents.len());

        Ok(UpstreamResponse::new(
            200,
            json!({
                "candidates": [
                    {"content": {"role": "model", "parts": [{"text": text}]}}
                ]
            }),
        ))
    }

    fn model_name(&self) -> &str {
        "mock-generative"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::first_candidate_text;

    #[tokio::test]
    async fn test_mock_echoes_last_turn() {
        let client = MockGenerativeClient::new();
        let contents = vec![UpstreamTurn::user("earlier"), UpstreamTurn::user("ping")];

        let response = client.generate("ignored", &contents).await.unwrap();

        assert!(response.is_success());
        assert_eq!(
            first_candidate_text(&response.body),
            Some("You said: ping (2 turns so far)")
        );
    }
}
