//! Evaluation repository port.

use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::{DomainError, InterviewId};
use async_trait::async_trait;

/// Repository port for end-of-interview evaluations.
///
/// An interview has at most one evaluation.
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// Save the evaluation for its interview.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the interview already has an evaluation
    /// - `DatabaseError` on persistence failure
    async fn save(&self, evaluation: &Evaluation) -> Result<(), DomainError>;

    /// Find the evaluation of an interview.
    ///
    /// Returns `None` if the interview was never evaluated.
    async fn find_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Option<Evaluation>, DomainError>;
}
