//! Message repository port.
//!
//! Append-only storage for conversation turns.

use crate::domain::conversation::Turn;
use crate::domain::foundation::{DomainError, InterviewId};
use async_trait::async_trait;

/// Repository port for an interview's conversation log.
///
/// Implementations must return turns ordered by `created_at`, with ties
/// broken by insertion order.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a turn to its interview's log.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, turn: &Turn) -> Result<(), DomainError>;

    /// List every turn of an interview in chronological order.
    ///
    /// Returns an empty list for unknown interviews.
    async fn list_by_interview(&self, interview_id: &InterviewId) -> Result<Vec<Turn>, DomainError>;
}
