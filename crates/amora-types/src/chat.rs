//! Chat session and message types for Amora.
//!
//! Sessions are bounded conversation threads owned by one user. Messages are
//! ordered by `created_at` within a session; that ordering is the sole
//! mechanism for conversation replay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Role of a message within a chat session.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant', 'system'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A chat session between a user and the coaching assistant.
///
/// `title` is set at most once (from an LLM-derived conversation title during
/// the recommendation flow); `last_message_preview` is refreshed on every
/// assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub last_message_preview: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single message within a chat session.
///
/// A system message with a non-null `recommendation_id` marks a context
/// boundary: raw messages at or before it are excluded from future LLM
/// context windows (they remain in history for display).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    /// Recommendation marker; non-null only on boundary system messages.
    pub recommendation_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Whether this message is a context boundary (see module docs).
    pub fn is_context_boundary(&self) -> bool {
        self.role == MessageRole::System && self.recommendation_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant, MessageRole::System] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let role = MessageRole::Assistant;
        let json = serde_json::to_string(&role).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_context_boundary_detection() {
        let mut msg = ChatMessage {
            id: Uuid::now_v7(),
            session_id: Uuid::now_v7(),
            role: MessageRole::System,
            content: "Ritual pack recommended".to_string(),
            recommendation_id: Some(Uuid::now_v7()),
            created_at: Utc::now(),
        };
        assert!(msg.is_context_boundary());

        msg.recommendation_id = None;
        assert!(!msg.is_context_boundary());

        msg.recommendation_id = Some(Uuid::now_v7());
        msg.role = MessageRole::Assistant;
        assert!(!msg.is_context_boundary());
    }

    #[test]
    fn test_chat_session_serialize() {
        let session = ChatSession {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            title: None,
            last_message_preview: Some("I hear you...".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"title\":null"));
        assert!(json.contains("I hear you..."));
    }
}
