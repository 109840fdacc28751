//! Model Gateway Port - Interface to the generative model.
//!
//! The interview workflows talk to the model in two shapes:
//!
//! - **Chat**: a role-tagged history plus one new user message, answered with
//!   the model's next reply. Used for every candidate message.
//! - **One-shot**: a single prompt answered with free text. Used for the
//!   opening greeting, the end-of-interview evaluation and code review.
//!
//! The gateway speaks only two roles. The interviewer persona is carried as
//! the first user/model pair of the history (see `ContextAssembler`), so no
//! separate system-instruction channel exists.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for generative model interactions.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Generates the model's reply to `context.message` given `context.history`.
    async fn generate_reply(&self, context: ChatContext) -> Result<String, GatewayError>;

    /// Generates free text for a single prompt with no history.
    async fn generate_once(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Speaker of a gateway turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayRole {
    User,
    Model,
}

impl GatewayRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayRole::User => "user",
            GatewayRole::Model => "model",
        }
    }
}

/// One entry of the history sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayTurn {
    pub role: GatewayRole,
    pub text: String,
}

impl GatewayTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: GatewayRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: GatewayRole::Model,
            text: text.into(),
        }
    }
}

/// Chat request: prior history plus the message to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub history: Vec<GatewayTurn>,
    pub message: String,
}

/// Model gateway errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered without any text.
    #[error("model returned no content")]
    EmptyResponse,

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl GatewayError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Returns true if the same request may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::RateLimited { .. }
                | GatewayError::Unavailable { .. }
                | GatewayError::Network(_)
                | GatewayError::Timeout { .. }
        )
    }
}
