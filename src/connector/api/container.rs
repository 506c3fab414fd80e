use std::sync::Arc;

use tracing::debug;

use crate::application::{CredentialProvider, GenerativeClient, RelayChatUseCase};
use crate::connector::adapter::{EnvCredentialProvider, GeminiClient, MockGenerativeClient};
use crate::domain::API_KEY_VAR;

pub struct ContainerConfig {
    /// Answer from the in-process mock instead of calling Gemini.
    pub mock_upstream: bool,
    /// Environment variable holding the upstream API key.
    pub api_key_var: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock_upstream: false,
            api_key_var: API_KEY_VAR.to_string(),
        }
    }
}

/// Wires adapters into the relay use case.
pub struct Container {
    generative_client: Arc<dyn GenerativeClient>,
    credentials: Arc<dyn CredentialProvider>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let generative_client: Arc<dyn GenerativeClient> = if config.mock_upstream {
            debug!("Using mock generative client");
            Arc::new(MockGenerativeClient::new())
        } else {
            let client = GeminiClient::from_env();
            debug!("Using Gemini model {}", client.model_name());
            Arc::new(client)
        };

        let credentials: Arc<dyn CredentialProvider> =
            Arc::new(EnvCredentialProvider::new(config.api_key_var));

        Self::with_adapters(generative_client, credentials)
    }

    /// Build from explicit adapters, bypassing the environment.
    pub fn with_adapters(
        generative_client: Arc<dyn GenerativeClient>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            generative_client,
            credentials,
        }
    }

    pub fn relay_use_case(&self) -> RelayChatUseCase {
        RelayChatUseCase::new(self.generative_client.clone(), self.credentials.clone())
    }

    pub fn model_name(&self) -> &str {
        self.generative_client.model_name()
    }

    pub fn has_api_key(&self) -> bool {
        self.credentials.api_key().is_some()
    }
}
