//! LLM gateway request/response shapes.
//!
//! The gateway exposes three distinct operations to the orchestrator:
//! an empathetic reply, a structured user-context extraction, and a plain
//! wrap-up message. These types model the data crossing that seam.

use serde::{Deserialize, Serialize};

use crate::chat::MessageRole;
use crate::context::{LoveType, RelationalNeed, RelationshipStatus};

/// A single message in an LLM conversation window.
///
/// Transient: context windows are recomputed per call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Result of the empathetic-reply gateway call.
#[derive(Debug, Clone, Deserialize)]
pub struct EmpatheticReply {
    /// The assistant's reply text.
    pub response: String,
    /// Advisory flag: the model judged the conversation ready for a pack
    /// recommendation. Does not gate the recommendation flow.
    pub ready_for_recommendation: bool,
}

/// Structured user context extracted by the LLM from a conversation window.
///
/// Any response that cannot be parsed into this shape is a hard failure for
/// the call -- there is no partial or best-effort extraction.
#[derive(Debug, Clone, Deserialize)]
pub struct UserContextExtraction {
    pub journey: String,
    pub love_types: Vec<LoveType>,
    pub relational_needs: Vec<RelationalNeed>,
    pub relationship_status: RelationshipStatus,
    pub semantic_summary: Option<String>,
    pub conversation_title: Option<String>,
}

/// Errors from LLM gateway operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empathetic_reply_deserialize() {
        let json = r#"{"response": "I hear you...", "ready_for_recommendation": false}"#;
        let reply: EmpatheticReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.response, "I hear you...");
        assert!(!reply.ready_for_recommendation);
    }

    #[test]
    fn test_extraction_deserialize() {
        let json = r#"{
            "journey": "rebuilding closeness after a distant period",
            "love_types": ["quality_time", "physical_touch"],
            "relational_needs": ["intimacy"],
            "relationship_status": "married",
            "semantic_summary": "early connection",
            "conversation_title": "Feeling distant lately"
        }"#;
        let extraction: UserContextExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(extraction.love_types.len(), 2);
        assert_eq!(extraction.relationship_status, RelationshipStatus::Married);
        assert_eq!(extraction.conversation_title.as_deref(), Some("Feeling distant lately"));
    }

    #[test]
    fn test_extraction_rejects_unknown_taxonomy_value() {
        let json = r#"{
            "journey": "x",
            "love_types": ["snacks"],
            "relational_needs": [],
            "relationship_status": "married",
            "semantic_summary": null,
            "conversation_title": null
        }"#;
        let result: Result<UserContextExtraction, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::Deserialization("unexpected token".to_string());
        assert_eq!(err.to_string(), "deserialization error: unexpected token");
    }
}
