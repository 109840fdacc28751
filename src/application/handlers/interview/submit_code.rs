//! SubmitCodeHandler - Command handler for reviewing a code submission.

use std::sync::Arc;

use crate::domain::conversation::{review_prompt, DEFAULT_CODE_LANGUAGE};
use crate::domain::foundation::InterviewId;
use crate::domain::interview::InterviewError;
use crate::domain::submission::{ReviewExtractor, Submission};
use crate::ports::{InterviewRepository, ModelGateway, SubmissionRepository};

/// Command to submit code for review.
#[derive(Debug, Clone)]
pub struct SubmitCodeCommand {
    pub interview_id: InterviewId,
    pub code: String,
    pub language: Option<String>,
}

/// Result of a reviewed submission.
#[derive(Debug, Clone)]
pub struct SubmitCodeResult {
    pub submission: Submission,
    /// False when the review could not be decoded and only raw feedback was kept.
    pub parsed: bool,
}

/// Handler for code submissions.
///
/// Nothing is persisted when the review call fails.
pub struct SubmitCodeHandler {
    interviews: Arc<dyn InterviewRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    gateway: Arc<dyn ModelGateway>,
    extractor: ReviewExtractor,
}

impl SubmitCodeHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            interviews,
            submissions,
            gateway,
            extractor: ReviewExtractor::new(),
        }
    }

    pub async fn handle(&self, cmd: SubmitCodeCommand) -> Result<SubmitCodeResult, InterviewError> {
        if cmd.code.trim().is_empty() {
            return Err(InterviewError::invalid_argument("code", "Code cannot be empty"));
        }
        let language = cmd
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_CODE_LANGUAGE)
            .to_string();

        let interview = self
            .interviews
            .find_by_id(&cmd.interview_id)
            .await?
            .ok_or(InterviewError::NotFound(cmd.interview_id))?;
        interview.ensure_active()?;

        let prompt = review_prompt(interview.problem_snapshot(), &language, &cmd.code);
        let text = self.gateway.generate_once(&prompt).await?;
        let (review, parsed) = self.extractor.extract(&text);

        let submission = Submission::new(
            cmd.interview_id,
            cmd.code,
            language,
            review.feedback_summary(),
            review.is_correct,
            review.simulated_results,
        );
        self.submissions.append(&submission).await?;

        tracing::info!(
            interview_id = %cmd.interview_id,
            submission_id = %submission.id,
            language = %submission.language,
            is_correct = ?submission.is_correct,
            parsed,
            "Code submission reviewed"
        );

        Ok(SubmitCodeResult { submission, parsed })
    }
}
