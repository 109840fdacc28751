//! Interview-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, InterviewId};
use crate::ports::GatewayError;

/// Errors surfaced by interview operations.
///
/// Store and state errors bubble up unchanged. Gateway failures only reach
/// callers where no fallback exists (SendMessage, the evaluation call of End,
/// SubmitCode); evaluation parse failures never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterviewError {
    /// Interview was not found.
    #[error("Interview not found: {0}")]
    NotFound(InterviewId),

    /// Operation not allowed in the interview's current status.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Caller supplied an unusable argument (e.g. an unparseable id).
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// The model gateway failed.
    #[error("Model gateway error: {0}")]
    Gateway(String),

    /// Persistence or other infrastructure failure.
    #[error("Store error: {0}")]
    Infrastructure(String),
}

impl InterviewError {
    pub fn not_found(id: InterviewId) -> Self {
        InterviewError::NotFound(id)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        InterviewError::InvalidState(message.into())
    }

    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        InterviewError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        InterviewError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            InterviewError::NotFound(_) => ErrorCode::InterviewNotFound,
            InterviewError::InvalidState(_) => ErrorCode::InterviewNotActive,
            InterviewError::InvalidArgument { .. } => ErrorCode::ValidationFailed,
            InterviewError::Gateway(_) => ErrorCode::AIProviderError,
            InterviewError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for InterviewError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InterviewNotFound => match err.details.get("interview_id") {
                Some(id) => match id.parse() {
                    Ok(id) => InterviewError::NotFound(id),
                    Err(_) => InterviewError::Infrastructure(err.to_string()),
                },
                None => InterviewError::Infrastructure(err.to_string()),
            },
            ErrorCode::InvalidStateTransition | ErrorCode::InterviewNotActive => {
                InterviewError::InvalidState(err.message)
            }
            ErrorCode::ValidationFailed => InterviewError::InvalidArgument {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::AIProviderError => InterviewError::Gateway(err.message),
            _ => InterviewError::Infrastructure(err.to_string()),
        }
    }
}

impl From<GatewayError> for InterviewError {
    fn from(err: GatewayError) -> Self {
        InterviewError::Gateway(err.to_string())
    }
}
