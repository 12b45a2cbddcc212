//! A2A message payloads sent to remote agents

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

/// Content part of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }
}

/// A single unit of communication, serialized with `"kind": "message"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename = "message", rename_all = "camelCase")]
pub struct Message {
    pub role: MessageRole,
    /// Unique per call
    pub message_id: String,
    pub parts: Vec<Part>,
}

impl Message {
    /// User message carrying `text` as its only part, with a fresh id.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            message_id: Uuid::new_v4().to_string(),
            parts: vec![Part::text(text)],
        }
    }
}

/// Parameters for `message/send` and `message/stream`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSendParams {
    pub message: Message,
}

/// Parameters for `tasks/get`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQueryParams {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_wire_shape() {
        let message = Message::user_text("Summarise Q3");
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["kind"], "message");
        assert_eq!(value["role"], "user");
        assert_eq!(value["parts"], json!([{"kind": "text", "text": "Summarise Q3"}]));
        assert!(value["messageId"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user_text("x");
        let b = Message::user_text("x");
        assert_ne!(a.message_id, b.message_id);
    }
}
