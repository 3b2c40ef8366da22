//! LLM gateway implementations.
//!
//! `AnthropicGateway` talks to the Anthropic Messages API; the prompt text
//! for the three gateway operations lives in [`prompts`].

pub mod anthropic;
pub mod prompts;

pub use anthropic::AnthropicGateway;
