use serde_json::{json, Value};
use thiserror::Error;

/// Name of the environment variable holding the upstream credential. It is
/// part of the relay's observable error contract.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Every way a relay invocation can fail, each with a fixed HTTP status and
/// JSON body.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Message is required")]
    BadRequest,

    #[error("Missing {}", API_KEY_VAR)]
    Configuration,

    /// Upstream answered with a non-success status; status and body are
    /// forwarded untouched.
    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: Value },

    /// The detail is logged, never sent to the caller.
    #[error("Server error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> u16 {
        match self {
            RelayError::MethodNotAllowed => 405,
            RelayError::BadRequest => 400,
            RelayError::Configuration => 500,
            RelayError::Upstream { status, .. } => *status,
            RelayError::Internal(_) => 500,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            RelayError::Upstream { body, .. } => body.clone(),
            RelayError::Internal(_) => json!({ "error": "Server error" }),
            other => json!({ "error": other.to_string() }),
        }
    }
}
