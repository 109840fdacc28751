//! Evaluation extraction - free model text to a bounded scorecard.
//!
//! Extraction never fails. Anything that does not decode yields the default
//! (all-zero, empty) scorecard together with `ok = false`.

use crate::domain::conversation::{evaluation_prompt, Turn};
use crate::domain::interview::ProblemSnapshot;
use crate::domain::submission::Submission;

use super::ScoreSet;

/// Removes a surrounding markdown code fence from a model reply.
///
/// Strips one leading ```` ```json ```` (or bare ```` ``` ````) marker and one
/// trailing ```` ``` ```` marker, then trims.
pub fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Decodes evaluator replies into [`ScoreSet`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationExtractor;

impl EvaluationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns the decoded scorecard and whether decoding succeeded.
    pub fn extract(&self, text: &str) -> (ScoreSet, bool) {
        let body = strip_json_fence(text);
        match serde_json::from_str::<ScoreSet>(body) {
            Ok(scores) => (scores, true),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    response_len = text.len(),
                    "Evaluation response was not valid JSON, using empty scorecard"
                );
                (ScoreSet::default(), false)
            }
        }
    }
}

/// Builds the evaluator prompt from the full conversation and submissions.
///
/// Transcript lines follow turn order; submissions follow the given order.
pub fn build_evaluation_prompt(
    snapshot: &ProblemSnapshot,
    turns: &[Turn],
    submissions: &[Submission],
) -> String {
    let transcript: String = turns
        .iter()
        .map(|turn| format!("{}\n", turn.transcript_line()))
        .collect();
    let submission_summary: String = submissions
        .iter()
        .map(|s| format!("Code ({}): {}\nResult: {}\n\n", s.language, s.code, s.ai_feedback))
        .collect();

    evaluation_prompt(snapshot, &transcript, &submission_summary)
}
