use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role names understood by the Gemini `generateContent` API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// A single entry of the upstream `contents` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamTurn {
    role: UpstreamRole,
    parts: Vec<Part>,
}

impl UpstreamTurn {
    pub fn new(role: UpstreamRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(UpstreamRole::User, text)
    }

    pub fn role(&self) -> UpstreamRole {
        self.role
    }

    /// Text of the first part, or `""` when the turn has none.
    pub fn text(&self) -> &str {
        self.parts.first().map(|p| p.text.as_str()).unwrap_or("")
    }
}

/// Request payload for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [UpstreamTurn],
}

/// Pull `candidates[0].content.parts[0].text` out of a successful response.
///
/// The body is walked loosely: any missing link, wrong type or empty text
/// yields `None` instead of an error.
pub fn first_candidate_text(body: &Value) -> Option<&str> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
