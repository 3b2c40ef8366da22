//! Conversation orchestration and trait definitions for Amora.
//!
//! This crate defines the "ports" (repository, gateway, and engine traits)
//! that the infrastructure layer implements, plus the conversation
//! orchestrator (`ChatService`) and its context-window algorithm. It depends
//! only on `amora-types` -- never on `amora-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod recommend;
pub mod user_context;
