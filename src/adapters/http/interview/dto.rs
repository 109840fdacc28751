//! HTTP DTOs for interview endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{EndInterviewResult, InterviewDetails};
use crate::domain::conversation::{Turn, TurnRole};
use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::InterviewStatus;
use crate::domain::interview::Interview;
use crate::domain::submission::{Submission, TestResult};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start an interview.
#[derive(Debug, Clone, Deserialize)]
pub struct StartInterviewRequest {
    pub user_id: String,
    pub problem_id: String,
    pub problem_snapshot: serde_json::Value,
}

/// Request to send a chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Request to submit code for review.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitCodeRequest {
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Query parameters for listing interviews.
#[derive(Debug, Clone, Deserialize)]
pub struct ListInterviewsQuery {
    pub user_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a started interview.
#[derive(Debug, Clone, Serialize)]
pub struct StartInterviewResponse {
    pub interview_id: String,
    pub greeting: String,
}

/// Response for a chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub message_id: String,
    pub user_message_id: String,
    pub reply: String,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub role: TurnRole,
    pub content: String,
    pub created_at: String,
}

impl From<Turn> for MessageResponse {
    fn from(turn: Turn) -> Self {
        Self {
            id: turn.id.to_string(),
            role: turn.role,
            content: turn.content,
            created_at: turn.created_at.to_rfc3339(),
        }
    }
}

/// Ordered conversation log.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub interview_id: String,
    pub messages: Vec<MessageResponse>,
}

/// A reviewed code submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub code: String,
    pub language: String,
    pub ai_feedback: String,
    pub is_correct: Option<bool>,
    pub test_results: Vec<TestResult>,
    pub submitted_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id.to_string(),
            code: submission.code,
            language: submission.language,
            ai_feedback: submission.ai_feedback,
            is_correct: submission.is_correct,
            test_results: submission.test_results,
            submitted_at: submission.submitted_at.to_rfc3339(),
        }
    }
}

/// Summary returned when an interview ends.
#[derive(Debug, Clone, Serialize)]
pub struct EndInterviewResponse {
    pub evaluation_id: String,
    pub overall_score: u8,
    pub feedback: String,
}

impl From<EndInterviewResult> for EndInterviewResponse {
    fn from(result: EndInterviewResult) -> Self {
        Self {
            evaluation_id: result.evaluation.id.to_string(),
            overall_score: result.evaluation.overall_score().value(),
            feedback: result.evaluation.detailed_feedback().to_string(),
        }
    }
}

/// Full scorecard.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResponse {
    pub id: String,
    pub problem_solving_score: u8,
    pub code_quality_score: u8,
    pub communication_score: u8,
    pub technical_score: u8,
    pub overall_score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub detailed_feedback: String,
    pub created_at: String,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(evaluation: Evaluation) -> Self {
        let scores = evaluation.scores;
        Self {
            id: evaluation.id.to_string(),
            problem_solving_score: scores.problem_solving_score.value(),
            code_quality_score: scores.code_quality_score.value(),
            communication_score: scores.communication_score.value(),
            technical_score: scores.technical_score.value(),
            overall_score: scores.overall_score.value(),
            strengths: scores.strengths,
            improvements: scores.improvements,
            detailed_feedback: scores.detailed_feedback,
            created_at: evaluation.created_at.to_rfc3339(),
        }
    }
}

/// Interview summary for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSummaryResponse {
    pub id: String,
    pub problem_id: String,
    pub status: InterviewStatus,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<i64>,
}

impl From<Interview> for InterviewSummaryResponse {
    fn from(interview: Interview) -> Self {
        Self {
            id: interview.id().to_string(),
            problem_id: interview.problem_id().to_string(),
            status: interview.status(),
            started_at: interview.started_at().to_rfc3339(),
            ended_at: interview.ended_at().map(|t| t.to_rfc3339()),
            duration_secs: interview.duration_secs(),
        }
    }
}

/// Detailed interview view.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewResponse {
    pub id: String,
    pub user_id: String,
    pub problem_id: String,
    pub problem_snapshot: serde_json::Value,
    pub status: InterviewStatus,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<i64>,
    pub messages: Vec<MessageResponse>,
    pub submissions: Vec<SubmissionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationResponse>,
}

impl From<InterviewDetails> for InterviewResponse {
    fn from(details: InterviewDetails) -> Self {
        let interview = details.interview;
        Self {
            id: interview.id().to_string(),
            user_id: interview.user_id().to_string(),
            problem_id: interview.problem_id().to_string(),
            problem_snapshot: interview.problem_snapshot().as_json().clone(),
            status: interview.status(),
            started_at: interview.started_at().to_rfc3339(),
            ended_at: interview.ended_at().map(|t| t.to_rfc3339()),
            duration_secs: interview.duration_secs(),
            messages: details.turns.into_iter().map(Into::into).collect(),
            submissions: details.submissions.into_iter().map(Into::into).collect(),
            evaluation: details.evaluation.map(Into::into),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new("MODEL_GATEWAY_ERROR", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
