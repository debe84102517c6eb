//! Message and Conversation domain types.
//!
//! These are the value objects that flow through a demo run:
//! the user's question goes in, the rendered prompt goes to the model,
//! tool results come back as `tool` messages, and the final answer comes out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role of a message sender in a conversation.
///
/// The conversation only ever holds these three roles: the user's question,
/// the assistant's replies, and tool execution results fed back to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The model's response
    Assistant,
    /// Tool execution result
    Tool,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content (never absent; empty string allowed)
    pub content: String,

    /// If this is a tool result, which tool call it responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Create a tool result message.
    pub fn tool_result(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Tool,
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
            timestamp: Utc::now(),
        }
    }
}

/// An ordered, append-only sequence of messages.
///
/// Owned exclusively by the workflow driver for the duration of one run;
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Ordered messages
    pub messages: Vec<Message>,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Count messages with the given role.
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("What time is it?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "What time is it?");
        assert!(msg.tool_call_id.is_none());
    }

    #[test]
    fn tool_result_carries_call_id() {
        let msg = Message::tool_result("call_0", "2024-05-20 16:30:00 -0400");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_0"));
    }

    #[test]
    fn conversation_is_append_only_ordered() {
        let mut conv = Conversation::new();
        conv.push(Message::user("first"));
        conv.push(Message::tool_result("call_0", "second"));
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[0].content, "first");
        assert_eq!(conv.messages[1].content, "second");
        assert_eq!(conv.count_role(Role::User), 1);
        assert_eq!(conv.count_role(Role::Tool), 1);
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = Message::tool_result("call_0", "ok");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"tool\""));
        assert!(json.contains("\"tool_call_id\":\"call_0\""));
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::user("Test message");
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.content, "Test message");
        assert_eq!(deserialized.role, Role::User);
    }
}
