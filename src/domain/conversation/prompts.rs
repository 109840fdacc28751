//! Prompt templates for the interviewer, evaluator and code reviewer.

use crate::domain::interview::ProblemSnapshot;

/// Greeting used when the model cannot produce one at interview start.
pub const FALLBACK_GREETING: &str =
    "Hello! I'm ready to help you with this problem. How would you like to start?";

/// Fixed model reply that closes the priming pair.
pub const PRIMING_ACKNOWLEDGEMENT: &str = "Understood. I am ready to conduct the interview.";

const INTERVIEWER_TEMPLATE: &str = "\
You are a senior software engineer conducting a coding interview.
Your role:
- Guide the candidate through the problem.
- Ask clarifying questions to understand their approach.
- Provide hints when they're stuck (but don't give away the solution).
- Evaluate their communication and problem-solving process.

Problem Context:
{problem}

Rules:
- Be encouraging but professional.
- Focus on understanding their thought process.
- If they ask for help, give progressive hints.
- Keep responses concise and conversational.
";

const GREETING_REQUEST: &str = "\n\nPlease start the interview by greeting the candidate \
and asking them to explain their initial thought process.";

const EVALUATOR_TEMPLATE: &str = "\
Evaluate this coding interview transcript.

Problem: {problem}
Transcript:
{transcript}
Code Submissions:
{submissions}

Score each dimension (0-10):
1. Problem Solving: Algorithm choice, optimization, edge cases
2. Code Quality: Readability, naming, structure, best practices
3. Communication: Clarity, asking questions, explaining approach
4. Technical Knowledge: Language mastery, CS fundamentals

Provide:
- Overall score (weighted average)
- Top 3 strengths
- Top 3 areas for improvement
- Detailed feedback paragraph
";

const EVALUATOR_JSON_INSTRUCTION: &str = "\nPlease output the result as a valid JSON object \
with keys: problem_solving_score, code_quality_score, communication_score, technical_score, \
overall_score, strengths (array), improvements (array), detailed_feedback.";

const REVIEWER_TEMPLATE: &str = "\
Role: Senior Technical Interviewer
Task: Review the candidate's code for the given problem.

Problem: {problem}
Code:
```{language}
{code}
```

Evaluate:
1. Logic correctness (Does it solve the problem?)
2. Time/Space Complexity
3. Code Style & Best Practices
4. Edge cases handling

Output JSON:
{
  \"is_correct\": boolean,
  \"feedback\": \"Concise feedback string\",
  \"complexity\": \"Time: O(n), Space: O(1)\",
  \"suggestions\": [\"list\", \"of\", \"improvements\"],
  \"simulated_results\": [{\"input\": \"...\", \"expected\": \"...\", \"actual\": \"...\", \"passed\": true}]
}
";

/// Substitutes `{name}` placeholders in one left-to-right pass over the
/// template. Inserted values are never rescanned, so placeholder-like text in
/// candidate code or messages stays literal. Unknown braces pass through.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = values.iter().find(|(name, _)| {
            tail.starts_with(name) && tail[name.len()..].starts_with('}')
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Interviewer persona with the problem interpolated.
pub fn interviewer_instruction(snapshot: &ProblemSnapshot) -> String {
    fill(INTERVIEWER_TEMPLATE, &[("problem", &snapshot.render())])
}

/// One-shot prompt asking the model to open the interview.
pub fn greeting_prompt(snapshot: &ProblemSnapshot) -> String {
    let mut prompt = interviewer_instruction(snapshot);
    prompt.push_str(GREETING_REQUEST);
    prompt
}

/// Evaluation prompt over a rendered transcript and submission summary.
pub fn evaluation_prompt(snapshot: &ProblemSnapshot, transcript: &str, submissions: &str) -> String {
    let problem = snapshot.render();
    let mut prompt = fill(
        EVALUATOR_TEMPLATE,
        &[
            ("problem", &problem),
            ("transcript", transcript),
            ("submissions", submissions),
        ],
    );
    prompt.push_str(EVALUATOR_JSON_INSTRUCTION);
    prompt
}

/// Code-review prompt for a single submission.
pub fn review_prompt(snapshot: &ProblemSnapshot, language: &str, code: &str) -> String {
    let problem = snapshot.render();
    fill(
        REVIEWER_TEMPLATE,
        &[("problem", &problem), ("language", language), ("code", code)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_sum() -> ProblemSnapshot {
        ProblemSnapshot::new(json!({"title": "Two Sum"})).unwrap()
    }

    #[test]
    fn interviewer_instruction_embeds_snapshot() {
        let text = interviewer_instruction(&two_sum());
        assert!(text.starts_with("You are a senior software engineer"));
        assert!(text.contains(r#"Problem Context:
{"title":"Two Sum"}"#));
        assert!(!text.contains("{problem}"));
    }

    #[test]
    fn greeting_prompt_asks_for_opening() {
        let text = greeting_prompt(&two_sum());
        assert!(text.ends_with("explain their initial thought process."));
    }

    #[test]
    fn evaluation_prompt_lists_json_keys() {
        let text = evaluation_prompt(&two_sum(), "[user]: hi\n", "");
        assert!(text.contains("Transcript:\n[user]: hi\n"));
        for key in [
            "problem_solving_score",
            "code_quality_score",
            "communication_score",
            "technical_score",
            "overall_score",
            "strengths",
            "improvements",
            "detailed_feedback",
        ] {
            assert!(text.contains(key), "missing {}", key);
        }
    }

    #[test]
    fn review_prompt_fences_code_with_language() {
        let text = review_prompt(&two_sum(), "python", "def f(): pass");
        assert!(text.contains("```python\ndef f(): pass\n```"));
        assert!(text.contains("\"simulated_results\""));
    }

    #[test]
    fn review_prompt_keeps_json_braces() {
        let text = review_prompt(&two_sum(), "go", "x");
        assert!(text.contains("Output JSON:\n{\n  \"is_correct\": boolean,"));
    }

    #[test]
    fn placeholders_inside_candidate_text_stay_literal() {
        let transcript = "[user]: print(f\"{submissions}\")\n[user]: {transcript} {problem}\n";
        let text = evaluation_prompt(&two_sum(), transcript, "Code (python): SECRET_CODE\n");

        assert!(text.contains(transcript));
        assert_eq!(text.matches("SECRET_CODE").count(), 1);
        assert_eq!(text.matches(r#"{"title":"Two Sum"}"#).count(), 1);
    }

    #[test]
    fn placeholders_inside_code_stay_literal() {
        let code = "x = f\"{problem}\"\ny = \"{code}{language}\"";
        let text = review_prompt(&two_sum(), "python", code);

        assert!(text.contains(&format!("```python\n{}\n```", code)));
        assert_eq!(text.matches(r#"{"title":"Two Sum"}"#).count(), 1);
    }

    #[test]
    fn placeholder_text_in_snapshot_stays_literal() {
        let snapshot = ProblemSnapshot::new(json!({"title": "{code}"})).unwrap();
        let text = review_prompt(&snapshot, "rust", "fn main() {}");

        assert!(text.contains(r#"Problem: {"title":"{code}"}"#));
        assert!(text.contains("```rust\nfn main() {}\n```"));
    }

    #[test]
    fn fill_passes_unknown_braces_through() {
        assert_eq!(fill("{a}{b}{", &[("a", "1")]), "1{b}{");
        assert_eq!(fill("no placeholders", &[("a", "1")]), "no placeholders");
    }
}
