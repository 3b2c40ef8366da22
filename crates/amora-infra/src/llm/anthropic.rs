//! AnthropicGateway -- concrete [`LlmGateway`] implementation for Anthropic Claude.
//!
//! Sends requests to the Anthropic Messages API (`/v1/messages`) with
//! proper authentication headers. Each gateway operation pairs its own
//! system prompt with the conversation window and parses the response
//! strictly.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use amora_core::llm::gateway::LlmGateway;
use amora_types::chat::MessageRole;
use amora_types::llm::{EmpatheticReply, LlmError, LlmMessage, UserContextExtraction};
use amora_types::recommendation::RitualPack;

use super::prompts::{EMPATHY_PROMPT, EXTRACTION_PROMPT, WRAP_UP_PROMPT};

/// Request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

/// A single message in an Anthropic conversation.
#[derive(Debug, Clone, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

/// Non-streaming response body from the Messages API.
#[derive(Debug, Clone, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
}

/// A content block in an Anthropic response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Anthropic Claude gateway.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. It never appears in Debug output,
/// Display output, or tracing logs.
pub struct AnthropicGateway {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl AnthropicGateway {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    /// Token ceiling for a single gateway response.
    const MAX_TOKENS: u32 = 1_024;

    /// Create a new Anthropic gateway.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Anthropic API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "claude-sonnet-4-20250514")
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Split a window into the Anthropic request shape.
    ///
    /// The Messages API accepts only user/assistant roles in `messages`, so
    /// system-role window entries (semantic summaries) are folded into the
    /// system prompt after the operation's base prompt.
    fn to_request(&self, base_prompt: &str, window: &[LlmMessage]) -> AnthropicRequest {
        let mut system = base_prompt.to_string();
        let mut messages = Vec::with_capacity(window.len());

        for msg in window {
            match msg.role {
                MessageRole::System => {
                    system.push_str("\n\n");
                    system.push_str(&msg.content);
                }
                role => messages.push(AnthropicMessage {
                    role: role.to_string(),
                    content: msg.content.clone(),
                }),
            }
        }

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: Self::MAX_TOKENS,
            messages,
            system: Some(system),
        }
    }

    /// POST the request and return the concatenated text content.
    #[tracing::instrument(name = "anthropic_call", skip(self, request))]
    async fn complete(&self, request: AnthropicRequest) -> Result<String, LlmError> {
        let url = self.url("/v1/messages");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                400 => LlmError::InvalidRequest(error_body),
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                529 => LlmError::Overloaded(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        Ok(parsed
            .content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join(""))
    }
}

/// Strip a markdown code fence around a JSON payload, if present.
///
/// Models occasionally wrap the requested JSON in ```json fences despite the
/// prompt. Anything else non-JSON still fails parsing downstream.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

impl LlmGateway for AnthropicGateway {
    async fn empathetic_reply(
        &self,
        messages: &[LlmMessage],
    ) -> Result<EmpatheticReply, LlmError> {
        let request = self.to_request(EMPATHY_PROMPT, messages);
        let text = self.complete(request).await?;

        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| LlmError::Deserialization(format!("empathetic reply: {e}")))
    }

    async fn extract_user_context(
        &self,
        messages: &[LlmMessage],
    ) -> Result<UserContextExtraction, LlmError> {
        let request = self.to_request(EXTRACTION_PROMPT, messages);
        let text = self.complete(request).await?;

        serde_json::from_str(strip_code_fence(&text))
            .map_err(|e| LlmError::Deserialization(format!("user context extraction: {e}")))
    }

    async fn wrap_up_message(
        &self,
        messages: &[LlmMessage],
        pack: Option<&RitualPack>,
    ) -> Result<String, LlmError> {
        let mut prompt = WRAP_UP_PROMPT.to_string();
        if let Some(pack) = pack {
            prompt.push_str(&format!(
                "\n\nA ritual pack called \"{}\" was just suggested to the user: {}. \
                 Weave a brief mention of it into the wrap-up.",
                pack.title, pack.description
            ));
        }

        let request = self.to_request(&prompt, messages);
        let text = self.complete(request).await?;
        Ok(text.trim().to_string())
    }
}
