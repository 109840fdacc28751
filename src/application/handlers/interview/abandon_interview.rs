//! AbandonInterviewHandler - Command handler for abandoning an interview.

use std::sync::Arc;

use crate::domain::foundation::InterviewId;
use crate::domain::interview::{Interview, InterviewError};
use crate::ports::InterviewRepository;

/// Command to abandon an active interview.
#[derive(Debug, Clone)]
pub struct AbandonInterviewCommand {
    pub interview_id: InterviewId,
}

/// Handler for abandoning interviews. No evaluation is produced.
pub struct AbandonInterviewHandler {
    interviews: Arc<dyn InterviewRepository>,
}

impl AbandonInterviewHandler {
    pub fn new(interviews: Arc<dyn InterviewRepository>) -> Self {
        Self { interviews }
    }

    pub async fn handle(&self, cmd: AbandonInterviewCommand) -> Result<Interview, InterviewError> {
        let mut interview = self
            .interviews
            .find_by_id(&cmd.interview_id)
            .await?
            .ok_or(InterviewError::NotFound(cmd.interview_id))?;

        interview.abandon()?;
        self.interviews.update(&interview).await?;

        tracing::info!(interview_id = %cmd.interview_id, "Interview abandoned");
        Ok(interview)
    }
}
