//! HTTP adapter for interview endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    EndInterviewResponse, ErrorResponse, EvaluationResponse, HistoryResponse, InterviewResponse,
    InterviewSummaryResponse, ListInterviewsQuery, MessageResponse, SendMessageRequest,
    SendMessageResponse, StartInterviewRequest, StartInterviewResponse, SubmissionResponse,
    SubmitCodeRequest,
};
pub use handlers::InterviewHandlers;
pub use routes::{interview_router, interview_routes};
