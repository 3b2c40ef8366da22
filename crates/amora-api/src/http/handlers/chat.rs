//! Conversation HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/chat/sessions/{id}/messages       - Send a message, get the reply
//! - POST /api/v1/chat/sessions/{id}/recommendation - Run a recommendation round
//! - GET  /api/v1/chat/sample-prompts               - Fixed conversation starters

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use amora_types::chat::ChatMessage;
use amora_types::recommendation::RitualPack;

use crate::http::error::AppError;
use crate::http::extractors::user::UserId;
use crate::http::response::ApiResponse;
use crate::state::{AppState, ConcreteChatService};

use super::session::parse_uuid;

/// Request body for sending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub content: String,
}

/// Response body for a send-message round trip.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    pub ready_for_recommendation: bool,
}

/// Response body for a recommendation round.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub ritual_pack: Option<RitualPack>,
    pub recommendation_id: Option<Uuid>,
    pub wrap_up_message: ChatMessage,
}

/// POST /api/v1/chat/sessions/{id}/messages - Send a user message.
pub async fn send_message(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(session_id): Path<String>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<ApiResponse<SendMessageResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("Message content must not be empty".to_string()));
    }

    let outcome = state
        .chat_service
        .send_message(user_id, sid, body.content)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let payload = SendMessageResponse {
        message: outcome.assistant_message,
        ready_for_recommendation: outcome.ready_for_recommendation,
    };
    let self_link = format!("/api/v1/chat/sessions/{sid}/messages");
    let resp = ApiResponse::success(payload, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}

/// POST /api/v1/chat/sessions/{id}/recommendation - Run a recommendation round.
pub async fn recommend(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<RecommendationResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let result = state
        .chat_service
        .recommend_ritual_pack(user_id, sid)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let payload = RecommendationResponse {
        ritual_pack: result.ritual_pack,
        recommendation_id: result.recommendation_id,
        wrap_up_message: result.wrap_up_message,
    };
    let self_link = format!("/api/v1/chat/sessions/{sid}/recommendation");
    let resp = ApiResponse::success(payload, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}

/// GET /api/v1/chat/sample-prompts - Fixed conversation starters.
pub async fn sample_prompts(
    State(_state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<&'static str>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let prompts = ConcreteChatService::sample_prompts().to_vec();

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(prompts, request_id, elapsed)
        .with_link("self", "/api/v1/chat/sample-prompts");

    Ok(Json(resp))
}
