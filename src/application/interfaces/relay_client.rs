use async_trait::async_trait;

use crate::domain::{ChatRequest, DomainError};

/// The chat client's view of the relay: one request in, one reply text out.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Returns the reply text, or an error whose display text is the reason
    /// to show the user.
    async fn send(&self, request: &ChatRequest) -> Result<String, DomainError>;
}
