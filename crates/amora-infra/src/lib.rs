//! Infrastructure implementations for Amora.
//!
//! Concrete adapters behind the amora-core traits: SQLite persistence,
//! the Anthropic LLM gateway, the catalog recommendation engine, and
//! configuration loading.

pub mod config;
pub mod llm;
pub mod recommend;
pub mod sqlite;
