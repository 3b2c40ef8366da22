//! RecommendationEngine trait definition.
//!
//! Given extracted user context, the engine returns the best-matching ritual
//! pack or `None`. "No pack" is a valid, non-error outcome -- there is no
//! implicit fallback.

use amora_types::context::UserContext;
use amora_types::error::RepositoryError;
use amora_types::recommendation::RitualPack;

/// Matches extracted user context against the ritual pack catalog.
pub trait RecommendationEngine: Send + Sync {
    fn recommend_ritual_pack(
        &self,
        context: &UserContext,
    ) -> impl std::future::Future<Output = Result<Option<RitualPack>, RepositoryError>> + Send;
}
