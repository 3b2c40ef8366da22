//! LLM gateway abstraction.
//!
//! The gateway is the orchestrator's only route to the language model;
//! concrete implementations (HTTP providers) live in amora-infra.

pub mod gateway;
