//! Caller identity extractor.
//!
//! The service trusts an upstream proxy for authentication and takes the
//! caller's id from the `X-User-Id` header. A missing or non-UUID value is
//! a request error, not an auth failure.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::AppState;

/// The calling user's id, parsed from the `X-User-Id` header.
pub struct UserId(pub Uuid);

impl FromRequestParts<AppState> for UserId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Validation("Missing X-User-Id header".to_string())
            })?;

        let user_id = raw
            .parse::<Uuid>()
            .map_err(|_| AppError::Validation(format!("Invalid X-User-Id: {raw}")))?;

        Ok(UserId(user_id))
    }
}
