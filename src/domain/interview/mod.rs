//! Interview domain module.
//!
//! Owns the interview lifecycle state machine: an interview starts `active`,
//! accepts chat turns only while active, and ends exactly once as either
//! `completed` (evaluated) or `abandoned`.

mod aggregate;
mod errors;
mod problem_snapshot;

pub use aggregate::Interview;
pub use errors::InterviewError;
pub use problem_snapshot::ProblemSnapshot;
