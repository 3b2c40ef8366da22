//! Chat session orchestration for Amora.
//!
//! `repository` defines the persistence trait, `context` the window
//! construction algorithm, and `service` the orchestrator tying sessions,
//! the LLM gateway, and the recommendation engine together.

pub mod context;
pub mod repository;
pub mod service;
