//! Conversation normalization
//!
//! Converts client-supplied chat turns into the role/content messages an
//! upstream provider expects.
//!
//! Clients are loose about the shape of a turn: the text may arrive as `text`
//! or `content`, and the role may be missing or unknown. The rules are:
//!
//! - `text` wins over `content` when both are present; neither means `""`.
//! - `user` and `assistant` map to themselves. Every other role, including a
//!   missing one, maps to `system`. Matching is exact and case-sensitive.
//! - A turn that is not an object becomes an empty `system` turn.
//!
//! The only failure is an empty conversation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Map a client-supplied role label, falling back to `System`
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("user") => Role::User,
            Some("assistant") => Role::Assistant,
            _ => Role::System,
        }
    }
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }
}

impl From<Value> for ChatTurn {
    /// Apply the turn rules to whatever the client sent
    ///
    /// A turn that is not a JSON object has no role and no text.
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return ChatTurn::new(Role::System, "");
        };

        let role = Role::from_label(fields.get("role").and_then(Value::as_str));
        let text = pick_text(fields.remove("text"))
            .or_else(|| pick_text(fields.remove("content")))
            .unwrap_or_default();

        ChatTurn { role, text }
    }
}

/// `None` for absent or null, the string itself for strings, JSON text otherwise
fn pick_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// A message in the shape providers expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: Role,
    pub content: String,
}

/// Rejected conversation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("conversation must contain at least one turn")]
    EmptyConversation,

    #[error("max_tokens must be a positive integer")]
    InvalidMaxTokens,

    #[error("provider '{0}' is not configured")]
    UnknownProvider(String),
}

/// Convert turns into provider messages, preserving order and length
pub fn normalize(turns: &[ChatTurn]) -> Result<Vec<ProviderMessage>, ValidationError> {
    if turns.is_empty() {
        return Err(ValidationError::EmptyConversation);
    }

    Ok(turns
        .iter()
        .map(|turn| ProviderMessage {
            role: turn.role,
            content: turn.text.clone(),
        })
        .collect())
}
