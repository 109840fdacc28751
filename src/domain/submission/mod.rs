//! Submission domain module.
//!
//! Code the candidate submits for review, and the decoding of the reviewer's
//! verdict.

mod review;
mod submission;

pub use review::{ReviewExtractor, ReviewOutcome};
pub use submission::{Submission, TestResult};
