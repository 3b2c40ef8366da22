//! SQLite recommendation repository implementation.
//!
//! Covers the ritual pack catalog plus recommendation records and their
//! history trail. `create_with_history` writes both rows in one transaction.

use amora_core::recommend::repository::RecommendationRepository;
use amora_types::context::{LoveType, RelationalNeed};
use amora_types::error::RepositoryError;
use amora_types::recommendation::{Recommendation, RitualPack};
use sqlx::Row;
use uuid::Uuid;

use super::chat::{format_datetime, parse_datetime};
use super::pool::DatabasePool;

/// SQLite-backed implementation of `RecommendationRepository`.
pub struct SqliteRecommendationRepository {
    pool: DatabasePool,
}

impl SqliteRecommendationRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain RitualPack.
struct RitualPackRow {
    id: String,
    slug: String,
    title: String,
    description: String,
    love_types: String,
    relational_needs: String,
    created_at: String,
}

impl RitualPackRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            love_types: row.try_get("love_types")?,
            relational_needs: row.try_get("relational_needs")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_pack(self) -> Result<RitualPack, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid pack id: {e}")))?;
        let love_types: Vec<LoveType> = serde_json::from_str(&self.love_types)
            .map_err(|e| RepositoryError::Query(format!("invalid love_types: {e}")))?;
        let relational_needs: Vec<RelationalNeed> = serde_json::from_str(&self.relational_needs)
            .map_err(|e| RepositoryError::Query(format!("invalid relational_needs: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(RitualPack {
            id,
            slug: self.slug,
            title: self.title,
            description: self.description,
            love_types,
            relational_needs,
            created_at,
        })
    }
}

impl RecommendationRepository for SqliteRecommendationRepository {
    async fn create_with_history(
        &self,
        recommendation: &Recommendation,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO recommendations (id, user_id, session_id, ritual_pack_id, source, status, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(recommendation.id.to_string())
        .bind(recommendation.user_id.to_string())
        .bind(recommendation.session_id.to_string())
        .bind(recommendation.ritual_pack_id.to_string())
        .bind(recommendation.source.to_string())
        .bind(recommendation.status.to_string())
        .bind(format_datetime(&recommendation.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO recommendation_history (id, recommendation_id, status, created_at)
               VALUES (?, ?, ?, ?)"#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(recommendation.id.to_string())
        .bind(recommendation.status.to_string())
        .bind(format_datetime(&recommendation.created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_ritual_packs(&self) -> Result<Vec<RitualPack>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM ritual_packs ORDER BY slug ASC")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut packs = Vec::with_capacity(rows.len());
        for row in &rows {
            let pack_row = RitualPackRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            packs.push(pack_row.into_pack()?);
        }

        Ok(packs)
    }

    async fn get_ritual_pack(
        &self,
        pack_id: &Uuid,
    ) -> Result<Option<RitualPack>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM ritual_packs WHERE id = ?")
            .bind(pack_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let pack_row = RitualPackRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(pack_row.into_pack()?))
            }
            None => Ok(None),
        }
    }

    async fn upsert_ritual_pack(&self, pack: &RitualPack) -> Result<(), RepositoryError> {
        let love_types = serde_json::to_string(&pack.love_types)
            .map_err(|e| RepositoryError::Query(format!("serialize love_types: {e}")))?;
        let relational_needs = serde_json::to_string(&pack.relational_needs)
            .map_err(|e| RepositoryError::Query(format!("serialize relational_needs: {e}")))?;

        // Keyed by slug so re-seeding refreshes the catalog in place.
        sqlx::query(
            r#"INSERT INTO ritual_packs (id, slug, title, description, love_types, relational_needs, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(slug) DO UPDATE SET
                   title = excluded.title,
                   description = excluded.description,
                   love_types = excluded.love_types,
                   relational_needs = excluded.relational_needs"#,
        )
        .bind(pack.id.to_string())
        .bind(&pack.slug)
        .bind(&pack.title)
        .bind(&pack.description)
        .bind(love_types)
        .bind(relational_needs)
        .bind(format_datetime(&pack.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amora_types::recommendation::{RecommendationSource, RecommendationStatus};
    use chrono::Utc;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_pack(slug: &str) -> RitualPack {
        RitualPack {
            id: Uuid::now_v7(),
            slug: slug.to_string(),
            title: "Reconnection Rituals".to_string(),
            description: "Small steps back toward each other".to_string(),
            love_types: vec![LoveType::QualityTime],
            relational_needs: vec![RelationalNeed::Intimacy, RelationalNeed::Trust],
            created_at: Utc::now(),
        }
    }

    fn make_recommendation(ritual_pack_id: Uuid) -> Recommendation {
        Recommendation {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            session_id: Uuid::now_v7(),
            ritual_pack_id,
            source: RecommendationSource::Chat,
            status: RecommendationStatus::Suggested,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_list_packs() {
        let pool = test_pool().await;
        let repo = SqliteRecommendationRepository::new(pool);

        repo.upsert_ritual_pack(&make_pack("beta")).await.unwrap();
        repo.upsert_ritual_pack(&make_pack("alpha")).await.unwrap();

        let packs = repo.list_ritual_packs().await.unwrap();
        assert_eq!(packs.len(), 2);
        assert_eq!(packs[0].slug, "alpha");
        assert_eq!(packs[1].slug, "beta");
        assert_eq!(packs[0].relational_needs.len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_same_slug_updates_in_place() {
        let pool = test_pool().await;
        let repo = SqliteRecommendationRepository::new(pool);

        let pack = make_pack("reconnect");
        repo.upsert_ritual_pack(&pack).await.unwrap();

        let mut updated = make_pack("reconnect");
        updated.title = "Deeper Reconnection".to_string();
        repo.upsert_ritual_pack(&updated).await.unwrap();

        let packs = repo.list_ritual_packs().await.unwrap();
        assert_eq!(packs.len(), 1);
        assert_eq!(packs[0].title, "Deeper Reconnection");
        // The original row (and id) survives the refresh.
        assert_eq!(packs[0].id, pack.id);
    }

    #[tokio::test]
    async fn test_get_ritual_pack() {
        let pool = test_pool().await;
        let repo = SqliteRecommendationRepository::new(pool);

        let pack = make_pack("lookup");
        repo.upsert_ritual_pack(&pack).await.unwrap();

        let found = repo.get_ritual_pack(&pack.id).await.unwrap().unwrap();
        assert_eq!(found.slug, "lookup");

        let missing = repo.get_ritual_pack(&Uuid::now_v7()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_with_history_writes_both_rows() {
        let pool = test_pool().await;
        let repo = SqliteRecommendationRepository::new(pool.clone());

        let pack = make_pack("pair");
        repo.upsert_ritual_pack(&pack).await.unwrap();

        let recommendation = make_recommendation(pack.id);
        repo.create_with_history(&recommendation).await.unwrap();

        let (rec_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(rec_count, 1);

        let (status,): (String,) = sqlx::query_as(
            "SELECT status FROM recommendation_history WHERE recommendation_id = ?",
        )
        .bind(recommendation.id.to_string())
        .fetch_one(&pool.reader)
        .await
        .unwrap();
        assert_eq!(status, "suggested");
    }

    #[tokio::test]
    async fn test_create_with_history_rolls_back_on_bad_pack() {
        let pool = test_pool().await;
        let repo = SqliteRecommendationRepository::new(pool.clone());

        // FK violation: pack does not exist, so neither row lands.
        let recommendation = make_recommendation(Uuid::now_v7());
        let err = repo.create_with_history(&recommendation).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Query(_)));

        let (rec_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recommendations")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(rec_count, 0);
        let (hist_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recommendation_history")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(hist_count, 0);
    }
}
