//! Conversation orchestrator.
//!
//! `ChatService` coordinates the chat repository, user-context repository,
//! recommendation repository, LLM gateway, and recommendation engine to
//! implement the two primary flows: send-message and recommend-ritual-pack.
//!
//! Atomicity boundary: the user's message is persisted before the gateway is
//! invoked, so the user's turn survives an LLM failure. Writes that depend
//! on the gateway's output (assistant message, preview, title) happen only
//! after a successful response, since a gateway call cannot be rolled back.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use amora_types::chat::{ChatMessage, ChatSession, MessageRole};
use amora_types::context::UserContext;
use amora_types::error::ChatError;
use amora_types::llm::{LlmMessage, UserContextExtraction};
use amora_types::recommendation::{
    Recommendation, RecommendationSource, RecommendationStatus, RitualPack,
};

use crate::chat::context::build_conversation_context;
use crate::chat::repository::ChatRepository;
use crate::llm::gateway::LlmGateway;
use crate::recommend::engine::RecommendationEngine;
use crate::recommend::repository::RecommendationRepository;
use crate::user_context::UserContextRepository;

/// Fixed conversation starters surfaced to new users.
pub const SAMPLE_PROMPTS: [&str; 3] = [
    "What's one small thing I can do today to make my partner feel appreciated?",
    "How can we improve our communication when we disagree?",
    "What's a fun activity we could try together this weekend?",
];

/// Preview marker written when a recommendation round completes.
pub const PACK_SUGGESTED_PREVIEW: &str = "\u{2728} Ritual pack suggested";

/// Maximum length, in characters, of the session preview text.
const PREVIEW_MAX_CHARS: usize = 160;

/// Result of the send-message flow.
#[derive(Debug, Clone)]
pub struct SendMessageOutcome {
    pub assistant_message: ChatMessage,
    /// Advisory flag from the gateway; does not gate the recommendation flow.
    pub ready_for_recommendation: bool,
}

/// Result of the recommend-ritual-pack flow.
#[derive(Debug, Clone)]
pub struct RitualPackRecommendation {
    pub ritual_pack: Option<RitualPack>,
    pub recommendation_id: Option<Uuid>,
    pub wrap_up_message: ChatMessage,
}

/// A session together with its full ordered message history.
#[derive(Debug, Clone)]
pub struct SessionWithMessages {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

/// Orchestrates chat sessions, LLM calls, and ritual pack recommendations.
///
/// Generic over its collaborators so tests can substitute fakes; concrete
/// wiring lives in amora-api's AppState.
pub struct ChatService<C, U, R, G, E>
where
    C: ChatRepository,
    U: UserContextRepository,
    R: RecommendationRepository,
    G: LlmGateway,
    E: RecommendationEngine,
{
    chat_repo: C,
    context_repo: U,
    recommendation_repo: R,
    gateway: G,
    engine: E,
}

impl<C, U, R, G, E> ChatService<C, U, R, G, E>
where
    C: ChatRepository,
    U: UserContextRepository,
    R: RecommendationRepository,
    G: LlmGateway,
    E: RecommendationEngine,
{
    pub fn new(chat_repo: C, context_repo: U, recommendation_repo: R, gateway: G, engine: E) -> Self {
        Self {
            chat_repo,
            context_repo,
            recommendation_repo,
            gateway,
            engine,
        }
    }

    /// Create a new empty session owned by the given user.
    pub async fn create_session(&self, user_id: Uuid) -> Result<ChatSession, ChatError> {
        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7(),
            user_id,
            title: None,
            last_message_preview: None,
            created_at: now,
            updated_at: now,
        };
        self.chat_repo.create_session(&session).await?;
        info!(session_id = %session.id, user_id = %user_id, "Chat session created");
        Ok(session)
    }

    /// Send a user message and obtain the assistant's empathetic reply.
    ///
    /// The user message is persisted before the gateway call; a gateway
    /// failure leaves it in place but writes nothing else.
    #[tracing::instrument(name = "send_message", skip(self, content), fields(session_id = %session_id))]
    pub async fn send_message(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        content: String,
    ) -> Result<SendMessageOutcome, ChatError> {
        let session = self.require_session(&session_id, &user_id).await?;

        let user_message = new_message(session_id, MessageRole::User, content, None);
        self.chat_repo.save_message(&user_message).await?;

        let window = self.load_context_window(&user_id, &session_id).await?;
        let reply = self.gateway.empathetic_reply(&window).await?;

        let assistant_message =
            new_message(session_id, MessageRole::Assistant, reply.response.clone(), None);
        self.chat_repo.save_message(&assistant_message).await?;
        info!(
            session_id = %session_id,
            message_id = %assistant_message.id,
            ready_for_recommendation = reply.ready_for_recommendation,
            "Assistant message created"
        );

        self.update_title_and_preview(session, None, &reply.response)
            .await?;

        Ok(SendMessageOutcome {
            assistant_message,
            ready_for_recommendation: reply.ready_for_recommendation,
        })
    }

    /// Run a recommendation round: extract context, look up a pack, wrap up
    /// the conversation segment, and mark the new context boundary.
    #[tracing::instrument(name = "recommend_ritual_pack", skip(self), fields(session_id = %session_id))]
    pub async fn recommend_ritual_pack(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<RitualPackRecommendation, ChatError> {
        let session = self.require_session(&session_id, &user_id).await?;

        let window = self.load_context_window(&user_id, &session_id).await?;

        let extraction = self.gateway.extract_user_context(&window).await?;
        let context = self.save_user_context(user_id, session_id, &extraction).await?;

        let pack = self
            .engine
            .recommend_ritual_pack(&context)
            .await
            .map_err(|e| ChatError::UpstreamUnavailable(e.to_string()))?;
        match &pack {
            Some(pack) => {
                info!(session_id = %session_id, ritual_pack_id = %pack.id, "Ritual pack recommended")
            }
            None => info!(session_id = %session_id, "No ritual pack could be recommended"),
        }

        let wrap_up_text = self.gateway.wrap_up_message(&window, pack.as_ref()).await?;
        let wrap_up_message =
            new_message(session_id, MessageRole::Assistant, wrap_up_text, None);
        self.chat_repo.save_message(&wrap_up_message).await?;

        let recommendation_id = match &pack {
            Some(pack) => Some(self.record_recommendation(user_id, session_id, pack).await?),
            None => None,
        };

        self.update_title_and_preview(
            session,
            extraction.conversation_title.as_deref(),
            PACK_SUGGESTED_PREVIEW,
        )
        .await?;

        Ok(RitualPackRecommendation {
            ritual_pack: pack,
            recommendation_id,
            wrap_up_message,
        })
    }

    /// Fetch a session and its full ordered message history.
    pub async fn get_session_with_messages(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<SessionWithMessages, ChatError> {
        let session = self.require_session(&session_id, &user_id).await?;
        let messages = self.chat_repo.get_messages(&session_id).await?;
        info!(session_id = %session_id, message_count = messages.len(), "Chat messages fetched");
        Ok(SessionWithMessages { session, messages })
    }

    /// List the caller's sessions, most recently updated first.
    pub async fn list_sessions(&self, user_id: Uuid) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.chat_repo.list_sessions(&user_id).await?)
    }

    /// Delete a session, its messages, and its user-context records.
    /// All-or-nothing; see `ChatRepository::delete_session`.
    pub async fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<(), ChatError> {
        self.chat_repo
            .delete_session(&user_id, &session_id)
            .await
            .map_err(|e| match e {
                amora_types::error::RepositoryError::NotFound => ChatError::SessionNotFound,
                other => other.into(),
            })?;
        info!(session_id = %session_id, "Chat session deleted");
        Ok(())
    }

    /// Fixed conversation starters; identical for every caller.
    pub fn sample_prompts() -> &'static [&'static str] {
        &SAMPLE_PROMPTS
    }

    // --- internals ---

    /// Ownership gate: resolve the session or fail with `SessionNotFound`.
    async fn require_session(
        &self,
        session_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<ChatSession, ChatError> {
        self.chat_repo
            .find_session_for_user(session_id, user_id)
            .await?
            .ok_or(ChatError::SessionNotFound)
    }

    /// Recompute the LLM context window from persisted state.
    async fn load_context_window(
        &self,
        user_id: &Uuid,
        session_id: &Uuid,
    ) -> Result<Vec<LlmMessage>, ChatError> {
        let messages = self.chat_repo.get_messages(session_id).await?;
        let contexts = self
            .context_repo
            .find_by_conversation(user_id, session_id)
            .await?;
        Ok(build_conversation_context(&messages, &contexts))
    }

    async fn save_user_context(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        extraction: &UserContextExtraction,
    ) -> Result<UserContext, ChatError> {
        let context = UserContext {
            id: Uuid::now_v7(),
            user_id,
            conversation_id: session_id,
            journey: extraction.journey.clone(),
            love_types: extraction.love_types.clone(),
            relational_needs: extraction.relational_needs.clone(),
            relationship_status: extraction.relationship_status,
            semantic_summary: extraction.semantic_summary.clone(),
            created_at: Utc::now(),
        };
        self.context_repo.create(&context).await?;
        info!(session_id = %session_id, user_context_id = %context.id, "User context saved");
        Ok(context)
    }

    /// Create the recommendation + history pair, then persist the boundary
    /// system message that settles this conversation round.
    async fn record_recommendation(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        pack: &RitualPack,
    ) -> Result<Uuid, ChatError> {
        let recommendation = Recommendation {
            id: Uuid::now_v7(),
            user_id,
            session_id,
            ritual_pack_id: pack.id,
            source: RecommendationSource::Chat,
            status: RecommendationStatus::Suggested,
            created_at: Utc::now(),
        };
        self.recommendation_repo
            .create_with_history(&recommendation)
            .await?;

        let boundary = new_message(
            session_id,
            MessageRole::System,
            format!("Ritual pack recommended: {}", pack.title),
            Some(recommendation.id),
        );
        self.chat_repo.save_message(&boundary).await?;

        Ok(recommendation.id)
    }

    /// Set the title only if currently unset and a candidate is supplied;
    /// always overwrite the preview.
    async fn update_title_and_preview(
        &self,
        mut session: ChatSession,
        title: Option<&str>,
        preview: &str,
    ) -> Result<(), ChatError> {
        if session.title.is_none() {
            if let Some(title) = title {
                session.title = Some(title.to_string());
            }
        }
        session.last_message_preview = Some(truncate_preview(preview));
        session.updated_at = Utc::now();
        self.chat_repo.update_session(&session).await?;
        Ok(())
    }
}

fn new_message(
    session_id: Uuid,
    role: MessageRole,
    content: String,
    recommendation_id: Option<Uuid>,
) -> ChatMessage {
    ChatMessage {
        id: Uuid::now_v7(),
        session_id,
        role,
        content,
        recommendation_id,
        created_at: Utc::now(),
    }
}

fn truncate_preview(text: &str) -> String {
    text.chars().take(PREVIEW_MAX_CHARS).collect()
}
