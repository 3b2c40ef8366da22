//! UserContextRepository trait definition.
//!
//! User-context records are append-only: created once per extraction event
//! and later queried by conversation. Deletion happens only as part of the
//! session cascade in `ChatRepository::delete_session`.

use amora_types::context::UserContext;
use amora_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for extracted user-context persistence.
pub trait UserContextRepository: Send + Sync {
    /// Persist a newly extracted context record.
    fn create(
        &self,
        context: &UserContext,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All context records for a conversation, ordered by created_at ASC.
    fn find_by_conversation(
        &self,
        user_id: &Uuid,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<UserContext>, RepositoryError>> + Send;
}
