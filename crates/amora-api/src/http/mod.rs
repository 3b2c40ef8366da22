//! HTTP/REST API layer for Amora.
//!
//! Axum-based REST API at `/api/v1/` with envelope response format and
//! CORS support. Caller identity comes from the `X-User-Id` header.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
