use crate::application::CredentialProvider;
use crate::domain::API_KEY_VAR;

/// Reads the API key from the process environment on every call.
pub struct EnvCredentialProvider {
    var: String,
}

impl EnvCredentialProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(API_KEY_VAR)
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|key| !key.is_empty())
    }
}

/// A fixed key, for tests and embedding.
pub struct StaticCredentialProvider {
    key: Option<String>,
}

impl StaticCredentialProvider {
    pub fn new(key: Option<String>) -> Self {
        Self {
            key: key.filter(|k| !k.is_empty()),
        }
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self::new(Some(key.into()))
    }

    pub fn missing() -> Self {
        Self::new(None)
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn api_key(&self) -> Option<String> {
        self.key.clone()
    }
}
