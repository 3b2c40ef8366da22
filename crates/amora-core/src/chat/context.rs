//! Conversation context-window construction.
//!
//! The window sent to the LLM gateway is recomputed on every orchestrator
//! call, never cached. It consists of synthesized system messages carrying
//! semantic summaries of settled conversation segments, followed by the raw
//! messages after the last recommendation boundary.
//!
//! A boundary is the most recent system message tagged with a recommendation
//! id. Once a recommendation round completes, everything at or before its
//! boundary is considered settled: compressed into a semantic summary rather
//! than replayed verbatim. This bounds context size across long-running
//! conversations with many recommendation rounds.

use amora_types::chat::{ChatMessage, MessageRole};
use amora_types::context::UserContext;
use amora_types::llm::LlmMessage;

/// Label prefixed to every synthesized semantic-summary message.
pub const SEMANTIC_SUMMARY_PREFIX: &str = "Semantic summary of earlier conversation context:";

/// The raw messages still relevant for LLM context.
///
/// Scans for the last system message carrying a recommendation id and
/// returns everything strictly after it. With no boundary, the full slice
/// is relevant; earlier boundaries are superseded by the last one.
pub fn relevant_messages(messages: &[ChatMessage]) -> &[ChatMessage] {
    match messages.iter().rposition(ChatMessage::is_context_boundary) {
        Some(boundary) => &messages[boundary + 1..],
        None => messages,
    }
}

/// Build the full context window for a gateway call.
///
/// Synthesized summary messages come first, in the order their source
/// context records were retrieved; relevant raw messages follow in
/// chronological order. Context records with a blank or whitespace-only
/// summary contribute nothing.
pub fn build_conversation_context(
    messages: &[ChatMessage],
    contexts: &[UserContext],
) -> Vec<LlmMessage> {
    let mut window: Vec<LlmMessage> = contexts
        .iter()
        .filter_map(|c| c.semantic_summary.as_deref())
        .filter(|summary| !summary.trim().is_empty())
        .map(|summary| LlmMessage {
            role: MessageRole::System,
            content: format!("{SEMANTIC_SUMMARY_PREFIX}\n{summary}"),
        })
        .collect();

    window.extend(relevant_messages(messages).iter().map(|m| LlmMessage {
        role: m.role,
        content: m.content.clone(),
    }));

    window
}
