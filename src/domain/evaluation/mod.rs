//! Evaluation domain module.
//!
//! The end-of-interview scorecard and its extraction from model output.

mod extractor;
mod scorecard;

pub use extractor::{build_evaluation_prompt, strip_json_fence, EvaluationExtractor};
pub use scorecard::{Evaluation, ScoreSet};
pub(crate) use scorecard::{lenient_string, lenient_string_list};
