//! Chat history resolution.
//!
//! [`ChatResolver`] turns a [`ConversationReference`] into a
//! [`ConversationHandle`], continuing an existing history when the service
//! has one and creating a new history otherwise.

use serde_json::Value;

mod resolver;

pub use resolver::{ChatResolver, NO_HISTORY_SENTINELS};


/// Identifies the conversation a caller wants to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationReference {
    pub character_id: String,
    /// `None` resumes the most recent history, or creates one if none exists.
    pub external_conversation_id: Option<String>,
}

impl ConversationReference {
    pub fn new(character_id: impl Into<String>) -> Self {
        Self {
            character_id: character_id.into(),
            external_conversation_id: None,
        }
    }

    pub fn with_history(
        character_id: impl Into<String>,
        external_conversation_id: impl Into<String>,
    ) -> Self {
        Self {
            character_id: character_id.into(),
            external_conversation_id: Some(external_conversation_id.into()),
        }
    }
}

/// Body of a resolved conversation. The service answers with JSON most of
/// the time, but some responses are plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationPayload {
    Text(String),
    Json(Value),
}

impl ConversationPayload {
    /// Parse `body` as JSON, keeping the raw text when it is not JSON.
    pub fn from_body(body: String) -> Self {
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => ConversationPayload::Json(value),
            Err(_) => ConversationPayload::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ConversationPayload::Json(value) => Some(value),
            ConversationPayload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConversationPayload::Text(text) => Some(text),
            ConversationPayload::Json(_) => None,
        }
    }
}

/// A resolved conversation, owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationHandle {
    pub character_id: String,
    pub external_conversation_id: Option<String>,
    pub payload: ConversationPayload,
}

impl ConversationHandle {
    /// The history id reported by the service, when the payload carries one.
    pub fn history_external_id(&self) -> Option<&str> {
        self.payload
            .as_json()
            .and_then(|value| value.get("external_id"))
            .and_then(Value::as_str)
    }
}
