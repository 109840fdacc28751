//! Interview aggregate entity.
//!
//! An interview is one candidate working one problem with the AI interviewer.
//! It exclusively owns its turns, submissions and (at most one) evaluation,
//! which are persisted separately and referenced by `InterviewId`.

use crate::domain::foundation::{
    DomainError, ErrorCode, InterviewId, InterviewStatus, ProblemId, StateMachine, Timestamp,
    UserId,
};
use serde::{Deserialize, Serialize};

use super::ProblemSnapshot;

/// Interview aggregate - the lifecycle record of one mock interview.
///
/// # Invariants
///
/// - `ended_at` is set if and only if `status != Active`
/// - `problem_snapshot` never changes after `start`
/// - `Completed` and `Abandoned` are terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    id: InterviewId,
    user_id: UserId,
    problem_id: ProblemId,
    problem_snapshot: ProblemSnapshot,
    status: InterviewStatus,
    /// Correlation token for a provider-side chat session. Never populated.
    provider_session_id: Option<String>,
    started_at: Timestamp,
    ended_at: Option<Timestamp>,
}

impl Interview {
    /// Starts a new active interview with the problem snapshot frozen now.
    pub fn start(user_id: UserId, problem_id: ProblemId, problem_snapshot: ProblemSnapshot) -> Self {
        Self {
            id: InterviewId::new(),
            user_id,
            problem_id,
            problem_snapshot,
            status: InterviewStatus::Active,
            provider_session_id: None,
            started_at: Timestamp::now(),
            ended_at: None,
        }
    }

    /// Reconstitute an interview from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: InterviewId,
        user_id: UserId,
        problem_id: ProblemId,
        problem_snapshot: ProblemSnapshot,
        status: InterviewStatus,
        provider_session_id: Option<String>,
        started_at: Timestamp,
        ended_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            user_id,
            problem_id,
            problem_snapshot,
            status,
            provider_session_id,
            started_at,
            ended_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &InterviewId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn problem_id(&self) -> &ProblemId {
        &self.problem_id
    }

    pub fn problem_snapshot(&self) -> &ProblemSnapshot {
        &self.problem_snapshot
    }

    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    pub fn provider_session_id(&self) -> Option<&str> {
        self.provider_session_id.as_deref()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn ended_at(&self) -> Option<&Timestamp> {
        self.ended_at.as_ref()
    }

    /// Seconds between start and end; `None` while active.
    pub fn duration_secs(&self) -> Option<i64> {
        self.ended_at
            .as_ref()
            .map(|ended| ended.seconds_since(&self.started_at).max(0))
    }

    /// Checks the end-timestamp invariant.
    pub fn is_consistent(&self) -> bool {
        self.ended_at.is_some() == !self.status.is_active()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Fails unless chat is still allowed.
    ///
    /// # Errors
    ///
    /// - `InterviewNotActive` if the interview is completed or abandoned
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::InterviewNotActive,
                format!("Interview is {}, not active", self.status),
            ))
        }
    }

    /// Marks the interview completed and stamps `ended_at`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the interview is active
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.end_with(InterviewStatus::Completed)
    }

    /// Marks the interview abandoned and stamps `ended_at`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the interview is active
    pub fn abandon(&mut self) -> Result<(), DomainError> {
        self.end_with(InterviewStatus::Abandoned)
    }

    fn end_with(&mut self, target: InterviewStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target)?;
        self.ended_at = Some(Timestamp::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_interview() -> Interview {
        Interview::start(
            UserId::new("candidate-1").unwrap(),
            ProblemId::new(),
            ProblemSnapshot::new(json!({"title": "Two Sum"})).unwrap(),
        )
    }

    #[test]
    fn new_interview_is_active_without_end() {
        let interview = test_interview();
        assert_eq!(interview.status(), InterviewStatus::Active);
        assert!(interview.ended_at().is_none());
        assert!(interview.provider_session_id().is_none());
        assert!(interview.is_consistent());
    }

    #[test]
    fn complete_sets_end_timestamp() {
        let mut interview = test_interview();
        interview.complete().unwrap();

        assert_eq!(interview.status(), InterviewStatus::Completed);
        assert!(interview.ended_at().is_some());
        assert!(!interview.ended_at().unwrap().is_before(interview.started_at()));
        assert_eq!(interview.duration_secs(), Some(0));
        assert!(interview.is_consistent());
    }

    #[test]
    fn duration_is_none_while_active() {
        assert!(test_interview().duration_secs().is_none());
    }

    #[test]
    fn abandon_sets_end_timestamp() {
        let mut interview = test_interview();
        interview.abandon().unwrap();

        assert_eq!(interview.status(), InterviewStatus::Abandoned);
        assert!(interview.is_consistent());
    }

    #[test]
    fn cannot_complete_twice() {
        let mut interview = test_interview();
        interview.complete().unwrap();
        let ended = *interview.ended_at().unwrap();

        let err = interview.complete().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(interview.ended_at(), Some(&ended));
    }

    #[test]
    fn cannot_complete_abandoned() {
        let mut interview = test_interview();
        interview.abandon().unwrap();
        assert!(interview.complete().is_err());
        assert_eq!(interview.status(), InterviewStatus::Abandoned);
    }

    #[test]
    fn ensure_active_rejects_terminal_states() {
        let mut interview = test_interview();
        assert!(interview.ensure_active().is_ok());

        interview.complete().unwrap();
        let err = interview.ensure_active().unwrap_err();
        assert_eq!(err.code, ErrorCode::InterviewNotActive);
    }

    #[test]
    fn snapshot_is_kept_verbatim() {
        let interview = test_interview();
        assert_eq!(interview.problem_snapshot().title(), Some("Two Sum"));
    }
}
