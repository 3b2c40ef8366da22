//! LlmGateway trait definition.
//!
//! Three distinct request shapes, one per orchestrator step. Uses native
//! async fn in traits (RPITIT, Rust 2024 edition); implementations live in
//! amora-infra (e.g., `AnthropicGateway`).
//!
//! Timeouts belong to the implementation; the orchestrator awaits each call
//! synchronously and treats any error as aborting the whole operation.

use amora_types::llm::{EmpatheticReply, LlmError, LlmMessage, UserContextExtraction};
use amora_types::recommendation::RitualPack;

/// Gateway to the language model.
pub trait LlmGateway: Send + Sync {
    /// Generate an empathetic reply to the conversation window.
    ///
    /// The returned `ready_for_recommendation` flag is advisory only.
    fn empathetic_reply(
        &self,
        messages: &[LlmMessage],
    ) -> impl std::future::Future<Output = Result<EmpatheticReply, LlmError>> + Send;

    /// Extract structured user context from the conversation window.
    ///
    /// An unparseable response is `LlmError::Deserialization` -- there is no
    /// partial extraction.
    fn extract_user_context(
        &self,
        messages: &[LlmMessage],
    ) -> impl std::future::Future<Output = Result<UserContextExtraction, LlmError>> + Send;

    /// Generate a wrap-up message closing out a recommendation round.
    ///
    /// `pack` is the recommended ritual pack, if any; "no pack" still gets a
    /// wrap-up.
    fn wrap_up_message(
        &self,
        messages: &[LlmMessage],
        pack: Option<&RitualPack>,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
