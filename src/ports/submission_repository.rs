//! Submission repository port.

use crate::domain::foundation::{DomainError, InterviewId};
use crate::domain::submission::Submission;
use async_trait::async_trait;

/// Repository port for code submissions.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Append a reviewed submission.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, submission: &Submission) -> Result<(), DomainError>;

    /// List an interview's submissions, oldest first.
    async fn list_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Vec<Submission>, DomainError>;
}
