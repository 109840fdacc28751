//! Shared fixtures for interview handler tests.

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::adapters::ai::MockModelGateway;
use crate::adapters::memory::InMemoryInterviewStore;
use crate::domain::conversation::Turn;
use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::{DomainError, InterviewId, ProblemId, UserId};
use crate::domain::interview::{Interview, ProblemSnapshot};
use crate::domain::submission::Submission;
use crate::ports::{
    EvaluationRepository, InterviewRepository, MessageRepository, SubmissionRepository,
};

pub(crate) fn two_sum_snapshot() -> ProblemSnapshot {
    ProblemSnapshot::new(json!({"title": "Two Sum"})).unwrap()
}

pub(crate) fn candidate() -> UserId {
    UserId::new("candidate-1").unwrap()
}

pub(crate) fn new_interview() -> Interview {
    Interview::start(candidate(), ProblemId::new(), two_sum_snapshot())
}

/// Saves a fresh active interview into the store.
pub(crate) async fn seeded_interview(store: &InMemoryInterviewStore) -> Interview {
    let interview = new_interview();
    InterviewRepository::save(store, &interview).await.unwrap();
    interview
}

pub(crate) fn gateway() -> MockModelGateway {
    MockModelGateway::new()
}

/// Store wrapper whose writes can be made to fail.
///
/// Reads always go to the wrapped in-memory store.
#[derive(Clone, Default)]
pub(crate) struct FlakyStore {
    pub inner: InMemoryInterviewStore,
    fail_interview_writes: Arc<AtomicBool>,
    fail_message_writes: Arc<AtomicBool>,
    fail_evaluation_writes: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_interview_writes(&self) {
        self.fail_interview_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_message_writes(&self) {
        self.fail_message_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_evaluation_writes(&self) {
        self.fail_evaluation_writes.store(true, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), DomainError> {
        if flag.load(Ordering::SeqCst) {
            Err(DomainError::database("Simulated write failure"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InterviewRepository for FlakyStore {
    async fn save(&self, interview: &Interview) -> Result<(), DomainError> {
        Self::check(&self.fail_interview_writes)?;
        InterviewRepository::save(&self.inner, interview).await
    }

    async fn update(&self, interview: &Interview) -> Result<(), DomainError> {
        Self::check(&self.fail_interview_writes)?;
        self.inner.update(interview).await
    }

    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Interview>, DomainError> {
        self.inner.find_by_user(user_id).await
    }
}

#[async_trait]
impl MessageRepository for FlakyStore {
    async fn append(&self, turn: &Turn) -> Result<(), DomainError> {
        Self::check(&self.fail_message_writes)?;
        MessageRepository::append(&self.inner, turn).await
    }

    async fn list_by_interview(&self, interview_id: &InterviewId) -> Result<Vec<Turn>, DomainError> {
        MessageRepository::list_by_interview(&self.inner, interview_id).await
    }
}

#[async_trait]
impl SubmissionRepository for FlakyStore {
    async fn append(&self, submission: &Submission) -> Result<(), DomainError> {
        SubmissionRepository::append(&self.inner, submission).await
    }

    async fn list_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Vec<Submission>, DomainError> {
        SubmissionRepository::list_by_interview(&self.inner, interview_id).await
    }
}

#[async_trait]
impl EvaluationRepository for FlakyStore {
    async fn save(&self, evaluation: &Evaluation) -> Result<(), DomainError> {
        Self::check(&self.fail_evaluation_writes)?;
        EvaluationRepository::save(&self.inner, evaluation).await
    }

    async fn find_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Option<Evaluation>, DomainError> {
        self.inner.find_by_interview(interview_id).await
    }
}
