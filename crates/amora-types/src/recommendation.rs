//! Ritual pack and recommendation types.
//!
//! A ritual pack is a curated bundle of relationship-improvement content.
//! Recommending one creates an immutable `Recommendation` plus an initial
//! `RecommendationHistory` entry; the pair is written atomically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::context::{LoveType, RelationalNeed};

/// Where a recommendation originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Chat,
    Weekly,
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationSource::Chat => write!(f, "chat"),
            RecommendationSource::Weekly => write!(f, "weekly"),
        }
    }
}

impl FromStr for RecommendationSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chat" => Ok(RecommendationSource::Chat),
            "weekly" => Ok(RecommendationSource::Weekly),
            other => Err(format!("invalid recommendation source: '{other}'")),
        }
    }
}

/// Lifecycle status of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Suggested,
    Viewed,
    Added,
    Skipped,
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationStatus::Suggested => write!(f, "suggested"),
            RecommendationStatus::Viewed => write!(f, "viewed"),
            RecommendationStatus::Added => write!(f, "added"),
            RecommendationStatus::Skipped => write!(f, "skipped"),
        }
    }
}

impl FromStr for RecommendationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "suggested" => Ok(RecommendationStatus::Suggested),
            "viewed" => Ok(RecommendationStatus::Viewed),
            "added" => Ok(RecommendationStatus::Added),
            "skipped" => Ok(RecommendationStatus::Skipped),
            other => Err(format!("invalid recommendation status: '{other}'")),
        }
    }
}

/// A curated bundle of relationship-improvement content.
///
/// The taxonomy fields drive the recommendation engine's overlap scoring
/// against extracted user context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RitualPack {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub love_types: Vec<LoveType>,
    pub relational_needs: Vec<RelationalNeed>,
    pub created_at: DateTime<Utc>,
}

/// A pack recommendation made to a user. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub ritual_pack_id: Uuid,
    pub source: RecommendationSource,
    pub status: RecommendationStatus,
    pub created_at: DateTime<Utc>,
}

/// Audit entry recording a recommendation status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationHistory {
    pub id: Uuid,
    pub recommendation_id: Uuid,
    pub status: RecommendationStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_source_roundtrip() {
        for source in [RecommendationSource::Chat, RecommendationSource::Weekly] {
            let s = source.to_string();
            let parsed: RecommendationSource = s.parse().unwrap();
            assert_eq!(source, parsed);
        }
    }

    #[test]
    fn test_recommendation_status_roundtrip() {
        for status in [
            RecommendationStatus::Suggested,
            RecommendationStatus::Viewed,
            RecommendationStatus::Added,
            RecommendationStatus::Skipped,
        ] {
            let s = status.to_string();
            let parsed: RecommendationStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_ritual_pack_serde() {
        let pack = RitualPack {
            id: Uuid::now_v7(),
            slug: "weekly-appreciation".to_string(),
            title: "Weekly Appreciation Ritual".to_string(),
            description: "Small daily gestures of gratitude".to_string(),
            love_types: vec![LoveType::WordsOfAffirmation],
            relational_needs: vec![RelationalNeed::Appreciation],
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&pack).unwrap();
        assert!(json.contains("\"words_of_affirmation\""));
        let parsed: RitualPack = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.slug, "weekly-appreciation");
    }
}
