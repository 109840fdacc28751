//! Conversation turns - the append-only log of an interview's dialogue.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{InterviewId, Timestamp, TurnId, ValidationError};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
    System,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::System => "system",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TurnRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            "system" => Ok(TurnRole::System),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown turn role '{}'", other),
            )),
        }
    }
}

/// One role-tagged message in an interview's conversation log.
///
/// Turns are never mutated after creation. The content of a user turn may
/// embed a fenced code block added by [`attach_code`](super::attach_code);
/// it is stored as-is and never parsed back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub interview_id: InterviewId,
    pub role: TurnRole,
    pub content: String,
    pub created_at: Timestamp,
}

impl Turn {
    /// Creates a new turn stamped now.
    pub fn new(interview_id: InterviewId, role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            interview_id,
            role,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a candidate turn.
    pub fn user(interview_id: InterviewId, content: impl Into<String>) -> Self {
        Self::new(interview_id, TurnRole::User, content)
    }

    /// Creates an interviewer turn.
    pub fn assistant(interview_id: InterviewId, content: impl Into<String>) -> Self {
        Self::new(interview_id, TurnRole::Assistant, content)
    }

    /// Transcript line used in the evaluation prompt.
    pub fn transcript_line(&self) -> String {
        format!("[{}]: {}", self.role, self.content)
    }
}

/// Orders turns by creation time.
///
/// The sort is stable, so turns sharing a timestamp keep the order in which
/// the store returned them (insertion order).
pub fn sort_chronologically(turns: &mut [Turn]) {
    turns.sort_by_key(|t| t.created_at);
}
