//! ListInterviewsHandler - Query handler for a candidate's interviews.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::interview::{Interview, InterviewError};
use crate::ports::InterviewRepository;

/// Query for all interviews of one candidate.
#[derive(Debug, Clone)]
pub struct ListInterviewsQuery {
    pub user_id: UserId,
}

/// Handler listing a candidate's interviews, newest first.
pub struct ListInterviewsHandler {
    interviews: Arc<dyn InterviewRepository>,
}

impl ListInterviewsHandler {
    pub fn new(interviews: Arc<dyn InterviewRepository>) -> Self {
        Self { interviews }
    }

    pub async fn handle(&self, query: ListInterviewsQuery) -> Result<Vec<Interview>, InterviewError> {
        Ok(self.interviews.find_by_user(&query.user_id).await?)
    }
}
