//! ChatRepository trait definition.
//!
//! CRUD operations for chat sessions and messages. Implementations live in
//! amora-infra (e.g., `SqliteChatRepository`). Uses native async fn in traits
//! (RPITIT, Rust 2024 edition).

use amora_types::chat::{ChatMessage, ChatSession};
use amora_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
pub trait ChatRepository: Send + Sync {
    /// Create a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a session by id, scoped to its owner.
    ///
    /// Returns `None` both when the session does not exist and when it exists
    /// but belongs to a different user -- callers treat the two identically.
    fn find_session_for_user(
        &self,
        session_id: &Uuid,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Update an existing session (title, preview, updated_at).
    fn update_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List a user's sessions, most recently updated first.
    fn list_sessions(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Save a new message within a session.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get all messages for a session, ordered by created_at ASC.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Delete a session, its messages, and all user-context records tied to
    /// `(user_id, session_id)`.
    ///
    /// Must be all-or-nothing: a failure in any of the three deletes rolls
    /// back the others. Returns `NotFound` when the session does not exist
    /// or is not owned by the given user.
    fn delete_session(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
