//! Evaluation entity and its scorecard.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{EvaluationId, InterviewId, Score, Timestamp};

/// Structured scorecard decoded from the evaluator's reply.
///
/// Decoding is lenient: missing fields take their defaults, scores are
/// clamped into range, and a lone string where a list is expected becomes a
/// one-element list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreSet {
    pub problem_solving_score: Score,
    pub code_quality_score: Score,
    pub communication_score: Score,
    pub technical_score: Score,
    pub overall_score: Score,
    #[serde(deserialize_with = "lenient_string_list")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "lenient_string_list")]
    pub improvements: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub detailed_feedback: String,
}

impl ScoreSet {
    /// True when nothing was extracted (the parse-failure fallback).
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Persisted evaluation of a completed interview. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub interview_id: InterviewId,
    pub scores: ScoreSet,
    pub created_at: Timestamp,
}

impl Evaluation {
    pub fn new(interview_id: InterviewId, scores: ScoreSet) -> Self {
        Self {
            id: EvaluationId::new(),
            interview_id,
            scores,
            created_at: Timestamp::now(),
        }
    }

    pub fn overall_score(&self) -> Score {
        self.scores.overall_score
    }

    pub fn detailed_feedback(&self) -> &str {
        &self.scores.detailed_feedback
    }
}

pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
