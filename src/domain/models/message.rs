use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::UpstreamRole;

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Normalise a role as it arrives over the wire.
    ///
    /// Only the exact string `"user"` is a user turn. Every other value,
    /// including a missing or non-string role, is treated as an assistant
    /// turn. Existing clients rely on this default, so unknown roles are
    /// folded in rather than rejected.
    pub fn from_wire(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_str) {
            Some("user") => Role::User,
            _ => Role::Assistant,
        }
    }

    pub fn to_upstream(self) -> UpstreamRole {
        match self {
            Role::User => UpstreamRole::User,
            Role::Assistant => UpstreamRole::Model,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One turn of the conversation as the chat client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
