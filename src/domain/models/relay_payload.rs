use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Message, Role, UpstreamTurn};
use crate::domain::RelayError;

/// Body of `POST /api/chat`.
///
/// `history` holds the turns exchanged *before* `message`; the new message is
/// never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    message: String,
    #[serde(default)]
    history: Vec<Message>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, history: Vec<Message>) -> Self {
        Self {
            message: message.into(),
            history,
        }
    }

    /// Validate a loosely-typed request body.
    ///
    /// `message` must be a non-empty string. `history` may be missing or
    /// `null`; entries are normalised with [`Role::from_wire`] and
    /// [`coerce_content`]. A `history` that is present but not an array, or
    /// that contains a `null` entry, is an internal error rather than a
    /// client error.
    pub fn from_json(body: &Value) -> Result<Self, RelayError> {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .ok_or(RelayError::BadRequest)?;

        let history = match body.get("history") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries
                .iter()
                .map(history_entry)
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(RelayError::internal(format!(
                    "history must be an array, got {}",
                    json_type_name(other)
                )))
            }
        };

        Ok(Self::new(message, history))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Prior turns followed by the new user turn, in upstream shape.
    pub fn upstream_turns(&self) -> Vec<UpstreamTurn> {
        self.history
            .iter()
            .map(|m| UpstreamTurn::new(m.role().to_upstream(), m.content()))
            .chain(std::iter::once(UpstreamTurn::user(self.message.as_str())))
            .collect()
    }
}

/// Successful relay response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Scalars have no `role` or `content` and read as an empty assistant turn;
/// `null` has no fields to read at all.
fn history_entry(entry: &Value) -> Result<Message, RelayError> {
    if entry.is_null() {
        return Err(RelayError::internal("history entry is null"));
    }
    Ok(Message::new(
        Role::from_wire(entry.get("role")),
        coerce_content(entry.get("content")),
    ))
}

/// Turn an arbitrary JSON `content` value into turn text.
///
/// Falsy values (missing, `null`, `false`, `0`, `""`) become the empty string,
/// strings pass through, everything else uses its compact JSON text.
pub fn coerce_content(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(other) => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpstreamRole;
    use serde_json::json;

    #[test]
    fn test_from_json_requires_message() {
        assert!(matches!(
            ChatRequest::from_json(&json!({})),
            Err(RelayError::BadRequest)
        ));
        assert!(matches!(
            ChatRequest::from_json(&json!({"message": ""})),
            Err(RelayError::BadRequest)
        ));
        assert!(matches!(
            ChatRequest::from_json(&json!({"message": 42})),
            Err(RelayError::BadRequest)
        ));
        assert!(matches!(
            ChatRequest::from_json(&json!("just a string")),
            Err(RelayError::BadRequest)
        ));
    }

    #[test]
    fn test_from_json_defaults_history() {
        let request = ChatRequest::from_json(&json!({"message": "hi"})).unwrap();
        assert!(request.history().is_empty());

        let request = ChatRequest::from_json(&json!({"message": "hi", "history": null})).unwrap();
        assert!(request.history().is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_array_history() {
        let result = ChatRequest::from_json(&json!({"message": "hi", "history": "nope"}));
        assert!(matches!(result, Err(RelayError::Internal(_))));
    }

    #[test]
    fn test_from_json_rejects_null_history_entry() {
        let result = ChatRequest::from_json(&json!({
            "message": "hi",
            "history": [{"role": "user", "content": "ok"}, null]
        }));
        assert!(matches!(result, Err(RelayError::Internal(_))));
    }

    #[test]
    fn test_from_json_reads_scalar_entry_as_empty_assistant_turn() {
        let request =
            ChatRequest::from_json(&json!({"message": "hi", "history": [5, "text"]})).unwrap();
        assert_eq!(
            request.history(),
            &[Message::assistant(""), Message::assistant("")]
        );
    }

    #[test]
    fn test_upstream_turns_appends_new_message_last() {
        let request = ChatRequest::from_json(&json!({
            "message": "and now?",
            "history": [
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi there"},
                {"role": "tool", "content": "ignored role"},
                {"content": "no role"}
            ]
        }))
        .unwrap();

        let turns = request.upstream_turns();
        assert_eq!(turns.len(), request.history().len() + 1);

        let roles: Vec<UpstreamRole> = turns.iter().map(|t| t.role()).collect();
        assert_eq!(
            roles,
            vec![
                UpstreamRole::User,
                UpstreamRole::Model,
                UpstreamRole::Model,
                UpstreamRole::Model,
                UpstreamRole::User,
            ]
        );

        let last = turns.last().unwrap();
        assert_eq!(last.text(), "and now?");
        assert_eq!(turns[1].text(), "hi there");
    }

    #[test]
    fn test_coerce_content() {
        assert_eq!(coerce_content(None), "");
        assert_eq!(coerce_content(Some(&Value::Null)), "");
        assert_eq!(coerce_content(Some(&json!(false))), "");
        assert_eq!(coerce_content(Some(&json!(0))), "");
        assert_eq!(coerce_content(Some(&json!("text"))), "text");
        assert_eq!(coerce_content(Some(&json!(12))), "12");
        assert_eq!(coerce_content(Some(&json!(true))), "true");
        assert_eq!(coerce_content(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest::new("hi", vec![Message::user("earlier")]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"message": "hi", "history": [{"role": "user", "content": "earlier"}]})
        );
    }
}
