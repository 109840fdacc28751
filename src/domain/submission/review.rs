//! Code review extraction.

use serde::{Deserialize, Serialize};

use crate::domain::evaluation::{lenient_string, lenient_string_list, strip_json_fence};

use super::TestResult;

/// Structured verdict decoded from the reviewer's reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewOutcome {
    pub is_correct: Option<bool>,
    #[serde(deserialize_with = "lenient_string")]
    pub feedback: String,
    #[serde(deserialize_with = "lenient_string")]
    pub complexity: String,
    #[serde(deserialize_with = "lenient_string_list")]
    pub suggestions: Vec<String>,
    pub simulated_results: Vec<TestResult>,
}

impl ReviewOutcome {
    /// Feedback text stored on the submission.
    ///
    /// Complexity and suggestions are appended as extra lines when present.
    pub fn feedback_summary(&self) -> String {
        let mut summary = self.feedback.trim().to_string();
        if !self.complexity.trim().is_empty() {
            if !summary.is_empty() {
                summary.push('\n');
            }
            summary.push_str("Complexity: ");
            summary.push_str(self.complexity.trim());
        }
        if !self.suggestions.is_empty() {
            if !summary.is_empty() {
                summary.push('\n');
            }
            summary.push_str("Suggestions:");
            for suggestion in &self.suggestions {
                summary.push_str("\n- ");
                summary.push_str(suggestion);
            }
        }
        summary
    }
}

/// Decodes reviewer replies into [`ReviewOutcome`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewExtractor;

impl ReviewExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns the decoded review and whether decoding succeeded.
    ///
    /// An undecodable reply keeps its raw text as the feedback, with no
    /// verdict and no test results.
    pub fn extract(&self, text: &str) -> (ReviewOutcome, bool) {
        match serde_json::from_str::<ReviewOutcome>(strip_json_fence(text)) {
            Ok(outcome) => (outcome, true),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    response_len = text.len(),
                    "Review response was not valid JSON, keeping raw feedback"
                );
                let outcome = ReviewOutcome {
                    feedback: text.trim().to_string(),
                    ..ReviewOutcome::default()
                };
                (outcome, false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_review() {
        let text = r#"```json
{
  "is_correct": true,
  "feedback": "Uses a hash map correctly.",
  "complexity": "Time: O(n), Space: O(n)",
  "suggestions": ["Handle empty input"],
  "simulated_results": [{"input": "[2,7,11,15], 9", "expected": "[0,1]", "actual": "[0,1]", "passed": true}]
}
```"#;
        let (outcome, ok) = ReviewExtractor::new().extract(text);

        assert!(ok);
        assert_eq!(outcome.is_correct, Some(true));
        assert_eq!(outcome.simulated_results.len(), 1);
        assert!(outcome.simulated_results[0].passed);
        assert_eq!(
            outcome.feedback_summary(),
            "Uses a hash map correctly.\nComplexity: Time: O(n), Space: O(n)\n\
             Suggestions:\n- Handle empty input"
        );
    }

    #[test]
    fn unparseable_review_keeps_raw_text() {
        let (outcome, ok) = ReviewExtractor::new().extract("  Looks fine to me.  ");
        assert!(!ok);
        assert_eq!(outcome.feedback, "Looks fine to me.");
        assert_eq!(outcome.is_correct, None);
        assert!(outcome.simulated_results.is_empty());
    }

    #[test]
    fn summary_of_bare_feedback_is_feedback() {
        let outcome = ReviewOutcome {
            feedback: "ok".to_string(),
            ..ReviewOutcome::default()
        };
        assert_eq!(outcome.feedback_summary(), "ok");
    }
}
