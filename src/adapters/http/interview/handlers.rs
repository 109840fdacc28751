//! HTTP handlers for interview endpoints.
//!
//! Handlers delegate to `InterviewFacade`, which parses ids and reports bad
//! input as `InterviewError::InvalidArgument`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::InterviewFacade;
use crate::domain::interview::InterviewError;

use super::dto::{
    EndInterviewResponse, ErrorResponse, HistoryResponse, InterviewResponse,
    InterviewSummaryResponse, ListInterviewsQuery, MessageResponse, SendMessageRequest,
    SendMessageResponse, StartInterviewRequest, StartInterviewResponse, SubmissionResponse,
    SubmitCodeRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler State
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for interview handlers.
#[derive(Clone)]
pub struct InterviewHandlers {
    facade: InterviewFacade,
}

impl InterviewHandlers {
    pub fn new(facade: InterviewFacade) -> Self {
        Self { facade }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/interviews - Start a new interview
pub async fn start_interview(
    State(handlers): State<InterviewHandlers>,
    Json(request): Json<StartInterviewRequest>,
) -> Response {
    match handlers
        .facade
        .start_interview(&request.user_id, &request.problem_id, request.problem_snapshot)
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(StartInterviewResponse {
                interview_id: result.interview.id().to_string(),
                greeting: result.greeting.content,
            }),
        )
            .into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/v1/interviews/:id/messages - Send a candidate message
pub async fn send_message(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    match handlers
        .facade
        .send_message(&interview_id, request.content, request.code, request.language)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(SendMessageResponse {
                message_id: result.reply.id.to_string(),
                user_message_id: result.user_turn.id.to_string(),
                reply: result.reply.content,
            }),
        )
            .into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/v1/interviews/:id/submissions - Submit code for review
pub async fn submit_code(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
    Json(request): Json<SubmitCodeRequest>,
) -> Response {
    match handlers
        .facade
        .submit_code(&interview_id, request.code, request.language)
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(SubmissionResponse::from(result.submission)),
        )
            .into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/v1/interviews/:id/end - End the interview and evaluate it
pub async fn end_interview(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
) -> Response {
    match handlers.facade.end_interview(&interview_id).await {
        Ok(result) => (StatusCode::OK, Json(EndInterviewResponse::from(result))).into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// POST /api/v1/interviews/:id/abandon - Abandon the interview
pub async fn abandon_interview(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
) -> Response {
    match handlers.facade.abandon_interview(&interview_id).await {
        Ok(interview) => (
            StatusCode::OK,
            Json(InterviewSummaryResponse::from(interview)),
        )
            .into_response(),
        Err(e) => handle_interview_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/interviews/:id/messages - Ordered conversation log
pub async fn get_history(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
) -> Response {
    match handlers.facade.get_history(&interview_id).await {
        Ok(turns) => (
            StatusCode::OK,
            Json(HistoryResponse {
                interview_id,
                messages: turns.into_iter().map(MessageResponse::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/v1/interviews/:id - Interview with messages, submissions and evaluation
pub async fn get_interview(
    State(handlers): State<InterviewHandlers>,
    Path(interview_id): Path<String>,
) -> Response {
    match handlers.facade.get_interview(&interview_id).await {
        Ok(details) => (StatusCode::OK, Json(InterviewResponse::from(details))).into_response(),
        Err(e) => handle_interview_error(e),
    }
}

/// GET /api/v1/interviews?user_id= - A user's interviews, newest first
pub async fn list_interviews(
    State(handlers): State<InterviewHandlers>,
    Query(query): Query<ListInterviewsQuery>,
) -> Response {
    match handlers.facade.list_interviews(&query.user_id).await {
        Ok(interviews) => {
            let body: Vec<InterviewSummaryResponse> =
                interviews.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handle_interview_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_interview_error(error: InterviewError) -> Response {
    match error {
        InterviewError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Interview", &id.to_string())),
        )
            .into_response(),
        InterviewError::InvalidArgument { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::bad_request(message)
                    .with_details(serde_json::json!({ "field": field })),
            ),
        )
            .into_response(),
        InterviewError::InvalidState(message) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(message)),
        )
            .into_response(),
        InterviewError::Gateway(message) => {
            tracing::warn!(error = %message, "model gateway error surfaced to client");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::bad_gateway(message)),
            )
                .into_response()
        }
        InterviewError::Infrastructure(message) => {
            tracing::error!(error = %message, "interview request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("An internal error occurred")),
            )
                .into_response()
        }
    }
}
