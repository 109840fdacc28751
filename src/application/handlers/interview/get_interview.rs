//! GetInterviewHandler - Query handler for an interview and everything it owns.

use std::sync::Arc;

use crate::domain::conversation::Turn;
use crate::domain::evaluation::Evaluation;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::{Interview, InterviewError};
use crate::domain::submission::Submission;
use crate::ports::{
    EvaluationRepository, InterviewRepository, MessageRepository, SubmissionRepository,
};

/// Query for a single interview.
#[derive(Debug, Clone)]
pub struct GetInterviewQuery {
    pub interview_id: InterviewId,
}

/// An interview with its turns, submissions and evaluation.
#[derive(Debug, Clone)]
pub struct InterviewDetails {
    pub interview: Interview,
    pub turns: Vec<Turn>,
    pub submissions: Vec<Submission>,
    pub evaluation: Option<Evaluation>,
}

/// Handler for fetching interview details.
pub struct GetInterviewHandler {
    interviews: Arc<dyn InterviewRepository>,
    messages: Arc<dyn MessageRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
}

impl GetInterviewHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        messages: Arc<dyn MessageRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
    ) -> Self {
        Self {
            interviews,
            messages,
            submissions,
            evaluations,
        }
    }

    pub async fn handle(&self, query: GetInterviewQuery) -> Result<InterviewDetails, InterviewError> {
        let interview = self
            .interviews
            .find_by_id(&query.interview_id)
            .await?
            .ok_or(InterviewError::NotFound(query.interview_id))?;

        let turns = self.messages.list_by_interview(&query.interview_id).await?;
        let submissions = self.submissions.list_by_interview(&query.interview_id).await?;
        let evaluation = self.evaluations.find_by_interview(&query.interview_id).await?;

        Ok(InterviewDetails {
            interview,
            turns,
            submissions,
            evaluation,
        })
    }
}
