//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `InterviewFacade` composes the handlers behind string-keyed operations.

mod facade;
pub mod handlers;

pub use facade::InterviewFacade;
pub use handlers::interview::{
    AbandonInterviewCommand, AbandonInterviewHandler, EndInterviewCommand, EndInterviewHandler,
    EndInterviewResult, GetHistoryHandler, GetHistoryQuery, GetInterviewHandler,
    GetInterviewQuery, InterviewDetails, ListInterviewsHandler, ListInterviewsQuery,
    SendMessageCommand, SendMessageHandler, SendMessageResult, StartInterviewCommand,
    StartInterviewHandler, StartInterviewResult, SubmitCodeCommand, SubmitCodeHandler,
    SubmitCodeResult,
};
