//! GetHistoryHandler - Query handler for an interview's conversation log.

use std::sync::Arc;

use crate::domain::conversation::Turn;
use crate::domain::foundation::InterviewId;
use crate::domain::interview::InterviewError;
use crate::ports::{InterviewRepository, MessageRepository};

/// Query for the ordered turns of an interview.
#[derive(Debug, Clone)]
pub struct GetHistoryQuery {
    pub interview_id: InterviewId,
}

/// Handler returning the stored turn log unchanged.
pub struct GetHistoryHandler {
    interviews: Arc<dyn InterviewRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl GetHistoryHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            interviews,
            messages,
        }
    }

    pub async fn handle(&self, query: GetHistoryQuery) -> Result<Vec<Turn>, InterviewError> {
        if self.interviews.find_by_id(&query.interview_id).await?.is_none() {
            return Err(InterviewError::NotFound(query.interview_id));
        }
        Ok(self.messages.list_by_interview(&query.interview_id).await?)
    }
}
