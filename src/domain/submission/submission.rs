//! Code submission entity.

use serde::{Deserialize, Serialize};

use crate::domain::evaluation::lenient_string;
use crate::domain::foundation::{InterviewId, SubmissionId, Timestamp};

/// One simulated test case reported by the reviewer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResult {
    #[serde(deserialize_with = "lenient_string")]
    pub input: String,
    #[serde(deserialize_with = "lenient_string")]
    pub expected: String,
    #[serde(deserialize_with = "lenient_string")]
    pub actual: String,
    pub passed: bool,
}

/// A piece of code the candidate submitted for review. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub interview_id: InterviewId,
    pub code: String,
    pub language: String,
    pub ai_feedback: String,
    pub is_correct: Option<bool>,
    pub test_results: Vec<TestResult>,
    pub submitted_at: Timestamp,
}

impl Submission {
    pub fn new(
        interview_id: InterviewId,
        code: impl Into<String>,
        language: impl Into<String>,
        ai_feedback: impl Into<String>,
        is_correct: Option<bool>,
        test_results: Vec<TestResult>,
    ) -> Self {
        Self {
            id: SubmissionId::new(),
            interview_id,
            code: code.into(),
            language: language.into(),
            ai_feedback: ai_feedback.into(),
            is_correct,
            test_results,
            submitted_at: Timestamp::now(),
        }
    }

    /// Number of simulated test cases that passed.
    pub fn passed_count(&self) -> usize {
        self.test_results.iter().filter(|r| r.passed).count()
    }
}
