//! EndInterviewHandler - Command handler for completing and evaluating an interview.

use std::sync::Arc;

use crate::domain::evaluation::{build_evaluation_prompt, Evaluation, EvaluationExtractor};
use crate::domain::foundation::{ErrorCode, InterviewId, InterviewStatus};
use crate::domain::interview::{Interview, InterviewError};
use crate::ports::{
    EvaluationRepository, InterviewRepository, MessageRepository, ModelGateway,
    SubmissionRepository,
};

/// Command to end an interview.
#[derive(Debug, Clone)]
pub struct EndInterviewCommand {
    pub interview_id: InterviewId,
}

/// Result of ending an interview.
#[derive(Debug, Clone)]
pub struct EndInterviewResult {
    pub evaluation: Evaluation,
    /// True when a stored evaluation was returned without recomputation.
    pub already_evaluated: bool,
    /// False when the model's reply could not be decoded and defaults were
    /// stored. For a stored evaluation, false when its scorecard is empty.
    pub parsed: bool,
}

impl EndInterviewResult {
    fn stored(evaluation: Evaluation) -> Self {
        let parsed = !evaluation.scores.is_empty();
        Self {
            evaluation,
            already_evaluated: true,
            parsed,
        }
    }
}

/// Handler for ending interviews.
///
/// The `completed` transition is persisted before the evaluation call and is
/// not rolled back if that call fails. Ending a completed interview that has
/// no evaluation yet re-runs the evaluation.
pub struct EndInterviewHandler {
    interviews: Arc<dyn InterviewRepository>,
    messages: Arc<dyn MessageRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    gateway: Arc<dyn ModelGateway>,
    extractor: EvaluationExtractor,
}

impl EndInterviewHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        messages: Arc<dyn MessageRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            interviews,
            messages,
            submissions,
            evaluations,
            gateway,
            extractor: EvaluationExtractor::new(),
        }
    }

    pub async fn handle(&self, cmd: EndInterviewCommand) -> Result<EndInterviewResult, InterviewError> {
        let mut interview = self
            .interviews
            .find_by_id(&cmd.interview_id)
            .await?
            .ok_or(InterviewError::NotFound(cmd.interview_id))?;

        if interview.status() == InterviewStatus::Completed {
            if let Some(evaluation) = self.evaluations.find_by_interview(&cmd.interview_id).await? {
                return Ok(EndInterviewResult::stored(evaluation));
            }
            tracing::info!(
                interview_id = %cmd.interview_id,
                "Completed interview has no evaluation, re-running evaluation"
            );
        } else {
            // Fails for abandoned interviews
            interview.complete()?;
            self.interviews.update(&interview).await?;
        }

        self.evaluate(&interview).await
    }

    async fn evaluate(&self, interview: &Interview) -> Result<EndInterviewResult, InterviewError> {
        let interview_id = *interview.id();

        let turns = self.messages.list_by_interview(&interview_id).await?;
        let submissions = self.submissions.list_by_interview(&interview_id).await?;
        let prompt = build_evaluation_prompt(interview.problem_snapshot(), &turns, &submissions);

        let text = self.gateway.generate_once(&prompt).await.map_err(|err| {
            tracing::warn!(
                interview_id = %interview_id,
                error = %err,
                "Evaluation generation failed, interview stays completed"
            );
            InterviewError::from(err)
        })?;

        let (scores, parsed) = self.extractor.extract(&text);
        let evaluation = Evaluation::new(interview_id, scores);

        match self.evaluations.save(&evaluation).await {
            Ok(()) => {}
            // A concurrent End stored its evaluation first
            Err(err) if err.code == ErrorCode::Conflict => {
                if let Some(existing) = self.evaluations.find_by_interview(&interview_id).await? {
                    return Ok(EndInterviewResult::stored(existing));
                }
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            interview_id = %interview_id,
            evaluation_id = %evaluation.id,
            overall_score = evaluation.overall_score().value(),
            turns = turns.len(),
            submissions = submissions.len(),
            parsed,
            "Interview evaluated"
        );

        Ok(EndInterviewResult {
            evaluation,
            already_evaluated: false,
            parsed,
        })
    }
}
