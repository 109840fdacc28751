//! Interview repository port.
//!
//! Defines the contract for persisting and retrieving Interview aggregates.

use crate::domain::foundation::{DomainError, InterviewId, UserId};
use crate::domain::interview::Interview;
use async_trait::async_trait;

/// Repository port for Interview aggregate persistence.
#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Save a new interview.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, interview: &Interview) -> Result<(), DomainError>;

    /// Update status, provider session and end timestamp of an existing interview.
    ///
    /// # Errors
    ///
    /// - `InterviewNotFound` if the interview doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, interview: &Interview) -> Result<(), DomainError>;

    /// Find an interview by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError>;

    /// Find all interviews for a candidate, newest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Interview>, DomainError>;
}
