use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in amora-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the conversation orchestrator.
///
/// Every failure aborts the whole in-flight operation; there are no partial
/// responses. Transient upstream failures are not retried here -- retry
/// policy, if any, belongs to the gateway collaborator.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The session does not exist or is not owned by the caller.
    #[error("session not found")]
    SessionNotFound,

    /// LLM gateway or recommendation engine timed out or errored.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The LLM returned a response that cannot be parsed into the expected
    /// structured shape. Fatal for the call.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Persistence-layer constraint violation.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Other persistence failure.
    #[error("storage error: {0}")]
    Storage(RepositoryError),
}

impl From<LlmError> for ChatError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Deserialization(msg) => ChatError::MalformedResponse(msg),
            other => ChatError::UpstreamUnavailable(other.to_string()),
        }
    }
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(msg) => ChatError::Integrity(msg),
            other => ChatError::Storage(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_llm_deserialization_maps_to_malformed() {
        let err: ChatError = LlmError::Deserialization("bad json".to_string()).into();
        assert!(matches!(err, ChatError::MalformedResponse(_)));
    }

    #[test]
    fn test_llm_provider_error_maps_to_upstream() {
        let err: ChatError = LlmError::Provider {
            message: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, ChatError::UpstreamUnavailable(_)));
    }

    #[test]
    fn test_repository_conflict_maps_to_integrity() {
        let err: ChatError = RepositoryError::Conflict("fk violation".to_string()).into();
        assert!(matches!(err, ChatError::Integrity(_)));
    }

    #[test]
    fn test_repository_query_maps_to_storage() {
        let err: ChatError = RepositoryError::Query("boom".to_string()).into();
        assert!(matches!(err, ChatError::Storage(_)));
    }
}
