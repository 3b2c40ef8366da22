//! Recommendation engine implementations.

pub mod engine;

pub use engine::CatalogRecommendationEngine;
