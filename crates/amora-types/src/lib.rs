//! Shared domain types for Amora.
//!
//! This crate contains the core domain types used across the Amora backend:
//! chat sessions and messages, extracted user context, ritual packs,
//! recommendations, LLM gateway shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod recommendation;
