//! Interview command and query handlers.

mod abandon_interview;
mod end_interview;
mod get_history;
mod get_interview;
mod list_interviews;
mod send_message;
mod start_interview;
mod submit_code;

#[cfg(test)]
pub(crate) mod test_support;

pub use abandon_interview::{AbandonInterviewCommand, AbandonInterviewHandler};
pub use end_interview::{EndInterviewCommand, EndInterviewHandler, EndInterviewResult};
pub use get_history::{GetHistoryHandler, GetHistoryQuery};
pub use get_interview::{GetInterviewHandler, GetInterviewQuery, InterviewDetails};
pub use list_interviews::{ListInterviewsHandler, ListInterviewsQuery};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use start_interview::{StartInterviewCommand, StartInterviewHandler, StartInterviewResult};
pub use submit_code::{SubmitCodeCommand, SubmitCodeHandler, SubmitCodeResult};
