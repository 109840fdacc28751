//! In-Memory Interview Store Adapter
//!
//! Implements every persistence port over process memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::Turn;
use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, UserId};
use crate::domain::interview::Interview;
use crate::domain::submission::Submission;
use crate::ports::{
    EvaluationRepository, InterviewRepository, MessageRepository, SubmissionRepository,
};

#[derive(Debug, Default)]
struct StoreState {
    interviews: HashMap<InterviewId, Interview>,
    /// Turns per interview in append order. `created_at` is strictly
    /// increasing within a log.
    turns: HashMap<InterviewId, Vec<Turn>>,
    submissions: HashMap<InterviewId, Vec<Submission>>,
    evaluations: HashMap<InterviewId, Evaluation>,
}

/// In-memory store for interviews and everything they own.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInterviewStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryInterviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn interview_count(&self) -> usize {
        self.state.read().await.interviews.len()
    }

    pub async fn turn_count(&self, interview_id: &InterviewId) -> usize {
        self.state
            .read()
            .await
            .turns
            .get(interview_id)
            .map_or(0, Vec::len)
    }

    pub async fn evaluation_count(&self) -> usize {
        self.state.read().await.evaluations.len()
    }
}

#[async_trait]
impl InterviewRepository for InMemoryInterviewStore {
    async fn save(&self, interview: &Interview) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.interviews.contains_key(interview.id()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Interview {} already exists", interview.id()),
            ));
        }
        state.interviews.insert(*interview.id(), interview.clone());
        Ok(())
    }

    async fn update(&self, interview: &Interview) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        match state.interviews.get_mut(interview.id()) {
            Some(stored) => {
                *stored = interview.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::InterviewNotFound,
                format!("Interview not found: {}", interview.id()),
            )
            .with_detail("interview_id", interview.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError> {
        Ok(self.state.read().await.interviews.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Interview>, DomainError> {
        let state = self.state.read().await;
        let mut interviews: Vec<Interview> = state
            .interviews
            .values()
            .filter(|i| i.user_id() == user_id)
            .cloned()
            .collect();
        interviews.sort_by(|a, b| b.started_at().cmp(a.started_at()));
        Ok(interviews)
    }
}

#[async_trait]
impl MessageRepository for InMemoryInterviewStore {
    async fn append(&self, turn: &Turn) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let log = state.turns.entry(turn.interview_id).or_default();

        let mut stored = turn.clone();
        if let Some(last) = log.last() {
            stored.created_at = stored.created_at.ordered_after(&last.created_at);
        }
        log.push(stored);
        Ok(())
    }

    async fn list_by_interview(&self, interview_id: &InterviewId) -> Result<Vec<Turn>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .turns
            .get(interview_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SubmissionRepository for InMemoryInterviewStore {
    async fn append(&self, submission: &Submission) -> Result<(), DomainError> {
        self.state
            .write()
            .await
            .submissions
            .entry(submission.interview_id)
            .or_default()
            .push(submission.clone());
        Ok(())
    }

    async fn list_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Vec<Submission>, DomainError> {
        let state = self.state.read().await;
        let mut submissions = state
            .submissions
            .get(interview_id)
            .cloned()
            .unwrap_or_default();
        submissions.sort_by_key(|s| s.submitted_at);
        Ok(submissions)
    }
}

#[async_trait]
impl EvaluationRepository for InMemoryInterviewStore {
    async fn save(&self, evaluation: &Evaluation) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.evaluations.contains_key(&evaluation.interview_id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Interview {} already has an evaluation", evaluation.interview_id),
            )
            .with_detail("interview_id", evaluation.interview_id.to_string()));
        }
        state
            .evaluations
            .insert(evaluation.interview_id, evaluation.clone());
        Ok(())
    }

    async fn find_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Option<Evaluation>, DomainError> {
        Ok(self.state.read().await.evaluations.get(interview_id).cloned())
    }
}
