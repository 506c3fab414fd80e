use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, UpstreamTurn};

/// Raw outcome of an upstream call that produced a readable JSON body,
/// whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a conversation to a generative-language API.
///
/// Implementors own transport and serialization. An `Err` means no JSON body
/// could be obtained at all (connection failure, unreadable body); non-success
/// statuses come back as `Ok` so callers can forward them.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(
        &self,
        api_key: &str,
        contents: &[UpstreamTurn],
    ) -> Result<UpstreamResponse, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
