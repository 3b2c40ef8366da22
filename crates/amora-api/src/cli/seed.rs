//! `seed-packs` command: load the ritual pack catalog from a TOML file.
//!
//! The file holds `[[packs]]` entries keyed by slug. Re-running against an
//! existing database refreshes matching packs in place.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use amora_core::recommend::repository::RecommendationRepository;
use amora_types::context::{LoveType, RelationalNeed};
use amora_types::recommendation::RitualPack;

use crate::state::AppState;

/// On-disk shape of the pack catalog file.
#[derive(Debug, serde::Deserialize)]
struct PackCatalog {
    #[serde(default)]
    packs: Vec<PackEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct PackEntry {
    slug: String,
    title: String,
    description: String,
    #[serde(default)]
    love_types: Vec<LoveType>,
    #[serde(default)]
    relational_needs: Vec<RelationalNeed>,
}

/// Upsert every pack in `file` into the catalog.
pub async fn seed_packs(state: &AppState, file: &Path) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
    let catalog: PackCatalog = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", file.display()))?;

    if catalog.packs.is_empty() {
        anyhow::bail!("{} contains no [[packs]] entries", file.display());
    }

    for entry in &catalog.packs {
        let pack = RitualPack {
            id: Uuid::now_v7(),
            slug: entry.slug.clone(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            love_types: entry.love_types.clone(),
            relational_needs: entry.relational_needs.clone(),
            created_at: Utc::now(),
        };
        state.recommendation_repo.upsert_ritual_pack(&pack).await?;
        println!(
            "  {} {}",
            console::style("✓").green(),
            console::style(&entry.slug).cyan()
        );
    }

    tracing::info!(count = catalog.packs.len(), "Ritual pack catalog seeded");
    println!();
    println!(
        "  {} Seeded {} ritual pack(s)",
        console::style("📦").bold(),
        catalog.packs.len()
    );

    Ok(())
}
