//! Recommendation abstractions: the engine that matches user context to a
//! ritual pack, and the repository persisting recommendation records.

pub mod engine;
pub mod repository;
