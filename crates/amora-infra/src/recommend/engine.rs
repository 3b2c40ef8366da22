//! Catalog-overlap recommendation engine.
//!
//! Scores every ritual pack in the catalog against the extracted user
//! context by taxonomy overlap and returns the best-scoring pack. A zero
//! score means no pack fits; `None` is the answer, with no fallback.

use tracing::debug;

use amora_core::recommend::engine::RecommendationEngine;
use amora_core::recommend::repository::RecommendationRepository;
use amora_types::context::UserContext;
use amora_types::error::RepositoryError;
use amora_types::recommendation::RitualPack;

/// Weight of a relational-need match relative to a love-type match.
///
/// Needs describe what the user is missing right now; love types describe
/// how they receive care. The former is the stronger signal.
const NEED_WEIGHT: usize = 2;

/// Matches user context against the ritual pack catalog by taxonomy overlap.
pub struct CatalogRecommendationEngine<R: RecommendationRepository> {
    repository: R,
}

impl<R: RecommendationRepository> CatalogRecommendationEngine<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

fn score(pack: &RitualPack, context: &UserContext) -> usize {
    let need_overlap = pack
        .relational_needs
        .iter()
        .filter(|n| context.relational_needs.contains(n))
        .count();
    let love_overlap = pack
        .love_types
        .iter()
        .filter(|t| context.love_types.contains(t))
        .count();
    need_overlap * NEED_WEIGHT + love_overlap
}

impl<R: RecommendationRepository> RecommendationEngine for CatalogRecommendationEngine<R> {
    async fn recommend_ritual_pack(
        &self,
        context: &UserContext,
    ) -> Result<Option<RitualPack>, RepositoryError> {
        let packs = self.repository.list_ritual_packs().await?;

        let best = packs
            .into_iter()
            .map(|pack| {
                let pack_score = score(&pack, context);
                (pack, pack_score)
            })
            .filter(|(_, pack_score)| *pack_score > 0)
            .max_by_key(|(_, pack_score)| *pack_score);

        match best {
            Some((pack, pack_score)) => {
                debug!(ritual_pack_id = %pack.id, score = pack_score, "Best-matching ritual pack");
                Ok(Some(pack))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amora_types::context::{LoveType, RelationalNeed, RelationshipStatus};
    use amora_types::recommendation::Recommendation;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    #[derive(Clone, Default)]
    struct FakeCatalog {
        packs: Arc<Mutex<Vec<RitualPack>>>,
    }

    impl RecommendationRepository for FakeCatalog {
        async fn create_with_history(
            &self,
            _recommendation: &Recommendation,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn list_ritual_packs(&self) -> Result<Vec<RitualPack>, RepositoryError> {
            Ok(self.packs.lock().unwrap().clone())
        }

        async fn get_ritual_pack(
            &self,
            _pack_id: &Uuid,
        ) -> Result<Option<RitualPack>, RepositoryError> {
            Ok(None)
        }

        async fn upsert_ritual_pack(&self, pack: &RitualPack) -> Result<(), RepositoryError> {
            self.packs.lock().unwrap().push(pack.clone());
            Ok(())
        }
    }

    fn make_pack(slug: &str, love_types: Vec<LoveType>, needs: Vec<RelationalNeed>) -> RitualPack {
        RitualPack {
            id: Uuid::now_v7(),
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            love_types,
            relational_needs: needs,
            created_at: Utc::now(),
        }
    }

    fn make_context(love_types: Vec<LoveType>, needs: Vec<RelationalNeed>) -> UserContext {
        UserContext {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            conversation_id: Uuid::now_v7(),
            journey: "reconnecting".to_string(),
            love_types,
            relational_needs: needs,
            relationship_status: RelationshipStatus::Married,
            semantic_summary: None,
            created_at: Utc::now(),
        }
    }

    async fn engine_with(packs: Vec<RitualPack>) -> CatalogRecommendationEngine<FakeCatalog> {
        let catalog = FakeCatalog::default();
        for pack in packs {
            catalog.upsert_ritual_pack(&pack).await.unwrap();
        }
        CatalogRecommendationEngine::new(catalog)
    }

    #[tokio::test]
    async fn test_picks_highest_overlap() {
        let weak = make_pack("weak", vec![LoveType::QualityTime], vec![]);
        let strong = make_pack(
            "strong",
            vec![LoveType::QualityTime],
            vec![RelationalNeed::Intimacy, RelationalNeed::Trust],
        );
        let engine = engine_with(vec![weak, strong.clone()]).await;

        let context = make_context(
            vec![LoveType::QualityTime],
            vec![RelationalNeed::Intimacy, RelationalNeed::Trust],
        );
        let best = engine.recommend_ritual_pack(&context).await.unwrap().unwrap();
        assert_eq!(best.id, strong.id);
    }

    #[tokio::test]
    async fn test_needs_outweigh_love_types() {
        let love_heavy = make_pack(
            "love-heavy",
            vec![LoveType::QualityTime, LoveType::PhysicalTouch, LoveType::ReceivingGifts],
            vec![],
        );
        let need_match = make_pack("need-match", vec![], vec![RelationalNeed::Communication, RelationalNeed::Trust]);
        let engine = engine_with(vec![love_heavy, need_match.clone()]).await;

        let context = make_context(
            vec![LoveType::QualityTime, LoveType::PhysicalTouch, LoveType::ReceivingGifts],
            vec![RelationalNeed::Communication, RelationalNeed::Trust],
        );
        // 2 needs * 2 = 4 beats 3 love types * 1 = 3.
        let best = engine.recommend_ritual_pack(&context).await.unwrap().unwrap();
        assert_eq!(best.id, need_match.id);
    }

    #[tokio::test]
    async fn test_no_overlap_yields_none() {
        let pack = make_pack("gifts", vec![LoveType::ReceivingGifts], vec![RelationalNeed::Play]);
        let engine = engine_with(vec![pack]).await;

        let context = make_context(vec![LoveType::QualityTime], vec![RelationalNeed::Trust]);
        let best = engine.recommend_ritual_pack(&context).await.unwrap();
        assert!(best.is_none());
    }

    #[tokio::test]
    async fn test_empty_catalog_yields_none() {
        let engine = engine_with(vec![]).await;
        let context = make_context(vec![LoveType::QualityTime], vec![RelationalNeed::Trust]);
        let best = engine.recommend_ritual_pack(&context).await.unwrap();
        assert!(best.is_none());
    }
}
