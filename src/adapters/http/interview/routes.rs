//! Axum router configuration for interview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    abandon_interview, end_interview, get_history, get_interview, list_interviews, send_message,
    start_interview, submit_code, InterviewHandlers,
};

/// Creates the router for interview endpoints.
///
/// # Routes
///
/// - `POST /` - Start an interview
/// - `GET /?user_id=` - List a user's interviews
/// - `GET /:id` - Interview details
/// - `POST /:id/messages` - Send a candidate message
/// - `GET /:id/messages` - Conversation history
/// - `POST /:id/submissions` - Submit code for review
/// - `POST /:id/end` - End and evaluate
/// - `POST /:id/abandon` - Abandon
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/", post(start_interview).get(list_interviews))
        .route("/:id", get(get_interview))
        .route("/:id/messages", post(send_message).get(get_history))
        .route("/:id/submissions", post(submit_code))
        .route("/:id/end", post(end_interview))
        .route("/:id/abandon", post(abandon_interview))
        .with_state(handlers)
}

/// Creates the complete interview API router, nested under `/interviews`.
pub fn interview_router(handlers: InterviewHandlers) -> Router {
    Router::new().nest("/interviews", interview_routes(handlers))
}
