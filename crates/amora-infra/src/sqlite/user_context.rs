//! SQLite user-context repository implementation.
//!
//! Taxonomy vectors (`love_types`, `relational_needs`) are stored as JSON
//! text columns and round-tripped through serde_json.

use amora_core::user_context::UserContextRepository;
use amora_types::context::{LoveType, RelationalNeed, RelationshipStatus, UserContext};
use amora_types::error::RepositoryError;
use sqlx::Row;
use uuid::Uuid;

use super::chat::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `UserContextRepository`.
pub struct SqliteUserContextRepository {
    pool: DatabasePool,
}

impl SqliteUserContextRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain UserContext.
struct UserContextRow {
    id: String,
    user_id: String,
    conversation_id: String,
    journey: String,
    love_types: String,
    relational_needs: String,
    relationship_status: String,
    semantic_summary: Option<String>,
    created_at: String,
}

impl UserContextRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            conversation_id: row.try_get("conversation_id")?,
            journey: row.try_get("journey")?,
            love_types: row.try_get("love_types")?,
            relational_needs: row.try_get("relational_needs")?,
            relationship_status: row.try_get("relationship_status")?,
            semantic_summary: row.try_get("semantic_summary")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_context(self) -> Result<UserContext, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid context id: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| RepositoryError::Query(format!("invalid user_id: {e}")))?;
        let conversation_id = Uuid::parse_str(&self.conversation_id)
            .map_err(|e| RepositoryError::Query(format!("invalid conversation_id: {e}")))?;
        let love_types: Vec<LoveType> = serde_json::from_str(&self.love_types)
            .map_err(|e| RepositoryError::Query(format!("invalid love_types: {e}")))?;
        let relational_needs: Vec<RelationalNeed> = serde_json::from_str(&self.relational_needs)
            .map_err(|e| RepositoryError::Query(format!("invalid relational_needs: {e}")))?;
        let relationship_status: RelationshipStatus = self
            .relationship_status
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(UserContext {
            id,
            user_id,
            conversation_id,
            journey: self.journey,
            love_types,
            relational_needs,
            relationship_status,
            semantic_summary: self.semantic_summary,
            created_at,
        })
    }
}

impl UserContextRepository for SqliteUserContextRepository {
    async fn create(&self, context: &UserContext) -> Result<(), RepositoryError> {
        let love_types = serde_json::to_string(&context.love_types)
            .map_err(|e| RepositoryError::Query(format!("serialize love_types: {e}")))?;
        let relational_needs = serde_json::to_string(&context.relational_needs)
            .map_err(|e| RepositoryError::Query(format!("serialize relational_needs: {e}")))?;

        sqlx::query(
            r#"INSERT INTO user_contexts (id, user_id, conversation_id, journey, love_types, relational_needs, relationship_status, semantic_summary, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(context.id.to_string())
        .bind(context.user_id.to_string())
        .bind(context.conversation_id.to_string())
        .bind(&context.journey)
        .bind(love_types)
        .bind(relational_needs)
        .bind(context.relationship_status.to_string())
        .bind(&context.semantic_summary)
        .bind(format_datetime(&context.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn find_by_conversation(
        &self,
        user_id: &Uuid,
        conversation_id: &Uuid,
    ) -> Result<Vec<UserContext>, RepositoryError> {
        let rows = sqlx::query(
            r#"SELECT * FROM user_contexts
               WHERE user_id = ? AND conversation_id = ?
               ORDER BY created_at ASC"#,
        )
        .bind(user_id.to_string())
        .bind(conversation_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut contexts = Vec::with_capacity(rows.len());
        for row in &rows {
            let context_row = UserContextRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            contexts.push(context_row.into_context()?);
        }

        Ok(contexts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_context(user_id: Uuid, conversation_id: Uuid) -> UserContext {
        UserContext {
            id: Uuid::now_v7(),
            user_id,
            conversation_id,
            journey: "reconnecting".to_string(),
            love_types: vec![LoveType::QualityTime, LoveType::WordsOfAffirmation],
            relational_needs: vec![RelationalNeed::Intimacy],
            relationship_status: RelationshipStatus::Married,
            semantic_summary: Some("Feeling distant lately".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_conversation() {
        let pool = test_pool().await;
        let repo = SqliteUserContextRepository::new(pool);

        let user_id = Uuid::now_v7();
        let conversation_id = Uuid::now_v7();
        let context = make_context(user_id, conversation_id);
        repo.create(&context).await.unwrap();

        let found = repo
            .find_by_conversation(&user_id, &conversation_id)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, context.id);
        assert_eq!(found[0].journey, "reconnecting");
        assert_eq!(found[0].love_types, context.love_types);
        assert_eq!(found[0].relational_needs, context.relational_needs);
        assert_eq!(found[0].relationship_status, RelationshipStatus::Married);
        assert_eq!(found[0].semantic_summary.as_deref(), Some("Feeling distant lately"));
    }

    #[tokio::test]
    async fn test_find_orders_by_created_at() {
        let pool = test_pool().await;
        let repo = SqliteUserContextRepository::new(pool);

        let user_id = Uuid::now_v7();
        let conversation_id = Uuid::now_v7();
        let base = Utc::now();
        for i in [2i64, 0, 1] {
            let mut context = make_context(user_id, conversation_id);
            context.created_at = base + chrono::Duration::seconds(i);
            repo.create(&context).await.unwrap();
        }

        let found = repo
            .find_by_conversation(&user_id, &conversation_id)
            .await
            .unwrap();
        assert_eq!(found.len(), 3);
        assert!(found[0].created_at <= found[1].created_at);
        assert!(found[1].created_at <= found[2].created_at);
    }

    #[tokio::test]
    async fn test_find_scoped_to_user_and_conversation() {
        let pool = test_pool().await;
        let repo = SqliteUserContextRepository::new(pool);

        let user_id = Uuid::now_v7();
        let conversation_id = Uuid::now_v7();
        repo.create(&make_context(user_id, conversation_id)).await.unwrap();
        repo.create(&make_context(user_id, Uuid::now_v7())).await.unwrap();
        repo.create(&make_context(Uuid::now_v7(), conversation_id)).await.unwrap();

        let found = repo
            .find_by_conversation(&user_id, &conversation_id)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_null_summary_round_trips() {
        let pool = test_pool().await;
        let repo = SqliteUserContextRepository::new(pool);

        let user_id = Uuid::now_v7();
        let conversation_id = Uuid::now_v7();
        let mut context = make_context(user_id, conversation_id);
        context.semantic_summary = None;
        repo.create(&context).await.unwrap();

        let found = repo
            .find_by_conversation(&user_id, &conversation_id)
            .await
            .unwrap();
        assert!(found[0].semantic_summary.is_none());
    }
}
