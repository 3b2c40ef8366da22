//! RecommendationRepository trait definition.
//!
//! Persists recommendation records, their history, and the ritual pack
//! catalog. Implementations live in amora-infra.

use amora_types::error::RepositoryError;
use amora_types::recommendation::{Recommendation, RitualPack};
use uuid::Uuid;

/// Repository trait for recommendations and the ritual pack catalog.
pub trait RecommendationRepository: Send + Sync {
    /// Create a recommendation together with its initial history entry.
    ///
    /// The two inserts are atomic: a failure in either leaves neither.
    fn create_with_history(
        &self,
        recommendation: &Recommendation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// The full ritual pack catalog.
    fn list_ritual_packs(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<RitualPack>, RepositoryError>> + Send;

    /// Look up a single pack by id.
    fn get_ritual_pack(
        &self,
        pack_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<RitualPack>, RepositoryError>> + Send;

    /// Insert or update a catalog pack, keyed by slug (used by seeding).
    fn upsert_ritual_pack(
        &self,
        pack: &RitualPack,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
