//! Session CRUD HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/chat/sessions      - Create a session
//! - GET    /api/v1/chat/sessions      - List the caller's sessions
//! - GET    /api/v1/chat/sessions/{id} - Get a session with its messages
//! - DELETE /api/v1/chat/sessions/{id} - Delete a session and everything in it

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use amora_types::chat::{ChatMessage, ChatSession};

use crate::http::error::AppError;
use crate::http::extractors::user::UserId;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub(super) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// Response body for session-with-messages.
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

/// POST /api/v1/chat/sessions - Create a new empty session.
pub async fn create_session(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = state.chat_service.create_session(user_id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let self_link = format!("/api/v1/chat/sessions/{}", session.id);
    let resp = ApiResponse::success(session, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}

/// GET /api/v1/chat/sessions - List the caller's sessions, newest first.
pub async fn list_sessions(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<ApiResponse<Vec<ChatSession>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sessions = state.chat_service.list_sessions(user_id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(sessions, request_id, elapsed)
        .with_link("self", "/api/v1/chat/sessions");

    Ok(Json(resp))
}

/// GET /api/v1/chat/sessions/{id} - Get a session with its full message history.
pub async fn get_session(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionDetail>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let fetched = state
        .chat_service
        .get_session_with_messages(user_id, sid)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let detail = SessionDetail {
        session: fetched.session,
        messages: fetched.messages,
    };
    let self_link = format!("/api/v1/chat/sessions/{sid}");
    let resp = ApiResponse::success(detail, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}

/// DELETE /api/v1/chat/sessions/{id} - Delete a session and its data.
pub async fn delete_session(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    state.chat_service.delete_session(user_id, sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        serde_json::json!({ "deleted": sid }),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
