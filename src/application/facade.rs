//! InterviewFacade - the entry point callers use to drive interviews.
//!
//! Accepts raw identifiers as strings, rejects unparseable ones before any
//! store access, and delegates everything else to the handlers.

use std::sync::Arc;

use crate::domain::conversation::Turn;
use crate::domain::foundation::{InterviewId, ProblemId, UserId};
use crate::domain::interview::{Interview, InterviewError, ProblemSnapshot};
use crate::ports::{
    EvaluationRepository, InterviewRepository, MessageRepository, ModelGateway,
    SubmissionRepository,
};

use super::handlers::interview::{
    AbandonInterviewCommand, AbandonInterviewHandler, EndInterviewCommand, EndInterviewHandler,
    EndInterviewResult, GetHistoryHandler, GetHistoryQuery, GetInterviewHandler,
    GetInterviewQuery, InterviewDetails, ListInterviewsHandler, ListInterviewsQuery,
    SendMessageCommand, SendMessageHandler, SendMessageResult, StartInterviewCommand,
    StartInterviewHandler, StartInterviewResult, SubmitCodeCommand, SubmitCodeHandler,
    SubmitCodeResult,
};

/// Composition of all interview handlers behind string-keyed operations.
#[derive(Clone)]
pub struct InterviewFacade {
    start: Arc<StartInterviewHandler>,
    send: Arc<SendMessageHandler>,
    history: Arc<GetHistoryHandler>,
    end: Arc<EndInterviewHandler>,
    get: Arc<GetInterviewHandler>,
    list: Arc<ListInterviewsHandler>,
    submit: Arc<SubmitCodeHandler>,
    abandon: Arc<AbandonInterviewHandler>,
}

impl InterviewFacade {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        messages: Arc<dyn MessageRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            start: Arc::new(StartInterviewHandler::new(
                interviews.clone(),
                messages.clone(),
                gateway.clone(),
            )),
            send: Arc::new(SendMessageHandler::new(
                interviews.clone(),
                messages.clone(),
                gateway.clone(),
            )),
            history: Arc::new(GetHistoryHandler::new(interviews.clone(), messages.clone())),
            end: Arc::new(EndInterviewHandler::new(
                interviews.clone(),
                messages.clone(),
                submissions.clone(),
                evaluations.clone(),
                gateway.clone(),
            )),
            get: Arc::new(GetInterviewHandler::new(
                interviews.clone(),
                messages,
                submissions.clone(),
                evaluations,
            )),
            list: Arc::new(ListInterviewsHandler::new(interviews.clone())),
            submit: Arc::new(SubmitCodeHandler::new(
                interviews.clone(),
                submissions,
                gateway,
            )),
            abandon: Arc::new(AbandonInterviewHandler::new(interviews)),
        }
    }

    /// StartInterview(userId, problemId, problemSnapshot) → (interview, greeting).
    pub async fn start_interview(
        &self,
        user_id: &str,
        problem_id: &str,
        problem_snapshot: serde_json::Value,
    ) -> Result<StartInterviewResult, InterviewError> {
        let cmd = StartInterviewCommand {
            user_id: parse_user_id(user_id)?,
            problem_id: parse_id::<ProblemId>("problem_id", problem_id)?,
            problem_snapshot: ProblemSnapshot::new(problem_snapshot).map_err(|e| {
                InterviewError::invalid_argument("problem_snapshot", e.to_string())
            })?,
        };
        self.start.handle(cmd).await
    }

    /// SendMessage(interviewId, content, code?, language?) → (user turn, reply).
    pub async fn send_message(
        &self,
        interview_id: &str,
        content: impl Into<String>,
        code: Option<String>,
        language: Option<String>,
    ) -> Result<SendMessageResult, InterviewError> {
        let cmd = SendMessageCommand {
            interview_id: parse_interview_id(interview_id)?,
            content: content.into(),
            code,
            language,
        };
        self.send.handle(cmd).await
    }

    /// GetHistory(interviewId) → ordered turns.
    pub async fn get_history(&self, interview_id: &str) -> Result<Vec<Turn>, InterviewError> {
        let query = GetHistoryQuery {
            interview_id: parse_interview_id(interview_id)?,
        };
        self.history.handle(query).await
    }

    /// EndInterview(interviewId) → evaluation summary.
    pub async fn end_interview(
        &self,
        interview_id: &str,
    ) -> Result<EndInterviewResult, InterviewError> {
        let cmd = EndInterviewCommand {
            interview_id: parse_interview_id(interview_id)?,
        };
        self.end.handle(cmd).await
    }

    pub async fn get_interview(
        &self,
        interview_id: &str,
    ) -> Result<InterviewDetails, InterviewError> {
        let query = GetInterviewQuery {
            interview_id: parse_interview_id(interview_id)?,
        };
        self.get.handle(query).await
    }

    pub async fn list_interviews(&self, user_id: &str) -> Result<Vec<Interview>, InterviewError> {
        let query = ListInterviewsQuery {
            user_id: parse_user_id(user_id)?,
        };
        self.list.handle(query).await
    }

    pub async fn submit_code(
        &self,
        interview_id: &str,
        code: impl Into<String>,
        language: Option<String>,
    ) -> Result<SubmitCodeResult, InterviewError> {
        let cmd = SubmitCodeCommand {
            interview_id: parse_interview_id(interview_id)?,
            code: code.into(),
            language,
        };
        self.submit.handle(cmd).await
    }

    pub async fn abandon_interview(&self, interview_id: &str) -> Result<Interview, InterviewError> {
        let cmd = AbandonInterviewCommand {
            interview_id: parse_interview_id(interview_id)?,
        };
        self.abandon.handle(cmd).await
    }
}

fn parse_interview_id(raw: &str) -> Result<InterviewId, InterviewError> {
    parse_id("interview_id", raw)
}

fn parse_id<T>(field: &str, raw: &str) -> Result<T, InterviewError>
where
    T: std::str::FromStr<Err = uuid::Error>,
{
    raw.trim()
        .parse()
        .map_err(|e: uuid::Error| InterviewError::invalid_argument(field, e.to_string()))
}

fn parse_user_id(raw: &str) -> Result<UserId, InterviewError> {
    UserId::new(raw).map_err(|e| InterviewError::invalid_argument("user_id", e.to_string()))
}
