//! HTTP adapters - REST API implementations.

pub mod interview;

use axum::Router;

pub use interview::{interview_router, InterviewHandlers};

/// Full API router with interview routes nested under `prefix` (e.g. `/api/v1`).
pub fn api_router(handlers: InterviewHandlers, prefix: &str) -> Router {
    Router::new().nest(prefix, interview_router(handlers))
}
