//! Extracted user context types and the relationship taxonomy.
//!
//! A `UserContext` is produced once per extraction event by the LLM gateway
//! and never updated in place -- a conversation may be extracted several
//! times, yielding multiple append-only records queried by conversation id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Love-language style preference extracted from conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoveType {
    WordsOfAffirmation,
    QualityTime,
    ActsOfService,
    ReceivingGifts,
    PhysicalTouch,
}

impl fmt::Display for LoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoveType::WordsOfAffirmation => "words_of_affirmation",
            LoveType::QualityTime => "quality_time",
            LoveType::ActsOfService => "acts_of_service",
            LoveType::ReceivingGifts => "receiving_gifts",
            LoveType::PhysicalTouch => "physical_touch",
        };
        write!(f, "{s}")
    }
}

impl FromStr for LoveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "words_of_affirmation" => Ok(LoveType::WordsOfAffirmation),
            "quality_time" => Ok(LoveType::QualityTime),
            "acts_of_service" => Ok(LoveType::ActsOfService),
            "receiving_gifts" => Ok(LoveType::ReceivingGifts),
            "physical_touch" => Ok(LoveType::PhysicalTouch),
            other => Err(format!("invalid love type: '{other}'")),
        }
    }
}

/// Relational need surfaced during a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationalNeed {
    Appreciation,
    Communication,
    EmotionalSafety,
    Intimacy,
    Play,
    SharedGrowth,
    Trust,
}

impl fmt::Display for RelationalNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationalNeed::Appreciation => "appreciation",
            RelationalNeed::Communication => "communication",
            RelationalNeed::EmotionalSafety => "emotional_safety",
            RelationalNeed::Intimacy => "intimacy",
            RelationalNeed::Play => "play",
            RelationalNeed::SharedGrowth => "shared_growth",
            RelationalNeed::Trust => "trust",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RelationalNeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "appreciation" => Ok(RelationalNeed::Appreciation),
            "communication" => Ok(RelationalNeed::Communication),
            "emotional_safety" => Ok(RelationalNeed::EmotionalSafety),
            "intimacy" => Ok(RelationalNeed::Intimacy),
            "play" => Ok(RelationalNeed::Play),
            "shared_growth" => Ok(RelationalNeed::SharedGrowth),
            "trust" => Ok(RelationalNeed::Trust),
            other => Err(format!("invalid relational need: '{other}'")),
        }
    }
}

/// Relationship status of the user at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Single,
    Dating,
    Partnered,
    Engaged,
    Married,
    Separated,
    Complicated,
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelationshipStatus::Single => "single",
            RelationshipStatus::Dating => "dating",
            RelationshipStatus::Partnered => "partnered",
            RelationshipStatus::Engaged => "engaged",
            RelationshipStatus::Married => "married",
            RelationshipStatus::Separated => "separated",
            RelationshipStatus::Complicated => "complicated",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RelationshipStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(RelationshipStatus::Single),
            "dating" => Ok(RelationshipStatus::Dating),
            "partnered" => Ok(RelationshipStatus::Partnered),
            "engaged" => Ok(RelationshipStatus::Engaged),
            "married" => Ok(RelationshipStatus::Married),
            "separated" => Ok(RelationshipStatus::Separated),
            "complicated" => Ok(RelationshipStatus::Complicated),
            other => Err(format!("invalid relationship status: '{other}'")),
        }
    }
}

/// Structured context extracted from a conversation segment.
///
/// Append-only: created once per extraction event, never mutated. The
/// `semantic_summary` (when non-blank) is replayed into future context
/// windows as a synthesized system message once the segment is settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContext {
    pub id: Uuid,
    pub user_id: Uuid,
    /// The chat session this context was extracted from.
    pub conversation_id: Uuid,
    /// Free-text descriptor of where the user is in their relationship journey.
    pub journey: String,
    pub love_types: Vec<LoveType>,
    pub relational_needs: Vec<RelationalNeed>,
    pub relationship_status: RelationshipStatus,
    pub semantic_summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_love_type_roundtrip() {
        for lt in [
            LoveType::WordsOfAffirmation,
            LoveType::QualityTime,
            LoveType::ActsOfService,
            LoveType::ReceivingGifts,
            LoveType::PhysicalTouch,
        ] {
            let s = lt.to_string();
            let parsed: LoveType = s.parse().unwrap();
            assert_eq!(lt, parsed);
        }
    }

    #[test]
    fn test_relational_need_roundtrip() {
        for need in [
            RelationalNeed::Appreciation,
            RelationalNeed::Communication,
            RelationalNeed::EmotionalSafety,
            RelationalNeed::Intimacy,
            RelationalNeed::Play,
            RelationalNeed::SharedGrowth,
            RelationalNeed::Trust,
        ] {
            let s = need.to_string();
            let parsed: RelationalNeed = s.parse().unwrap();
            assert_eq!(need, parsed);
        }
    }

    #[test]
    fn test_relationship_status_roundtrip() {
        for status in [
            RelationshipStatus::Single,
            RelationshipStatus::Dating,
            RelationshipStatus::Partnered,
            RelationshipStatus::Engaged,
            RelationshipStatus::Married,
            RelationshipStatus::Separated,
            RelationshipStatus::Complicated,
        ] {
            let s = status.to_string();
            let parsed: RelationshipStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_taxonomy_serde_snake_case() {
        let json = serde_json::to_string(&LoveType::WordsOfAffirmation).unwrap();
        assert_eq!(json, "\"words_of_affirmation\"");
        let json = serde_json::to_string(&RelationalNeed::EmotionalSafety).unwrap();
        assert_eq!(json, "\"emotional_safety\"");
        let parsed: RelationshipStatus = serde_json::from_str("\"complicated\"").unwrap();
        assert_eq!(parsed, RelationshipStatus::Complicated);
    }

    #[test]
    fn test_user_context_serialize() {
        let ctx = UserContext {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            conversation_id: Uuid::now_v7(),
            journey: "rebuilding closeness".to_string(),
            love_types: vec![LoveType::QualityTime],
            relational_needs: vec![RelationalNeed::Intimacy, RelationalNeed::Trust],
            relationship_status: RelationshipStatus::Married,
            semantic_summary: Some("early connection".to_string()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"quality_time\""));
        assert!(json.contains("early connection"));
    }
}
