use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::application::{CredentialProvider, GenerativeClient};
use crate::domain::{first_candidate_text, ChatReply, ChatRequest, RelayError};

/// Reply used when upstream succeeds but carries no candidate text.
pub const FALLBACK_REPLY: &str = "Sorry, I didn’t get a response.";

/// The Chat Relay: validates a chat request, forwards it upstream with the
/// configured API key and turns the outcome into a reply or a [`RelayError`].
///
/// Holds no mutable state; one instance can serve any number of concurrent
/// requests.
pub struct RelayChatUseCase {
    client: Arc<dyn GenerativeClient>,
    credentials: Arc<dyn CredentialProvider>,
}

impl RelayChatUseCase {
    pub fn new(
        client: Arc<dyn GenerativeClient>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Handle one relay invocation.
    ///
    /// `body` is `None` when the request body was not valid JSON. Checks run
    /// in a fixed order: method, credential, body. Only a request that passes
    /// all three reaches upstream.
    pub async fn execute(
        &self,
        method: &str,
        body: Option<&Value>,
    ) -> Result<ChatReply, RelayError> {
        if method != "POST" {
            debug!("Rejecting {} request", method);
            return Err(RelayError::MethodNotAllowed);
        }

        let api_key = self
            .credentials
            .api_key()
            .ok_or(RelayError::Configuration)
            .inspect_err(|e| error!("Relay is not configured: {}", e))?;

        let request = match body {
            Some(body) => ChatRequest::from_json(body).inspect_err(|e| {
                if let RelayError::Internal(detail) = e {
                    error!("Malformed chat request: {}", detail);
                }
            })?,
            None => return Err(RelayError::BadRequest),
        };

        self.forward(&api_key, &request).await
    }

    async fn forward(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatReply, RelayError> {
        let contents = request.upstream_turns();
        info!(
            "Relaying message with {} prior turns to {}",
            request.history().len(),
            self.client.model_name()
        );

        let start_time = Instant::now();
        let response = self
            .client
            .generate(api_key, &contents)
            .await
            .map_err(|e| {
                error!("Upstream call failed: {}", e);
                RelayError::internal(e.to_string())
            })?;

        if !response.is_success() {
            warn!("Upstream returned {}: {}", response.status, response.body);
            return Err(RelayError::Upstream {
                status: response.status,
                body: response.body,
            });
        }

        let reply = match first_candidate_text(&response.body) {
            Some(text) => text.to_string(),
            None => {
                warn!("Upstream response had no candidate text, using fallback reply");
                FALLBACK_REPLY.to_string()
            }
        };

        debug!(
            "Upstream replied with {} chars in {:.2}s",
            reply.chars().count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(ChatReply::new(reply))
    }
}
