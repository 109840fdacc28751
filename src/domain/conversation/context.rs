//! Context assembly - turns the stored log into the dialogue sent to the model.
//!
//! The model never sees a system role. The interviewer persona travels as a
//! priming pair at the head of every history:
//!
//! ```text
//! user:  <interviewer instruction with problem snapshot>
//! model: Understood. I am ready to conduct the interview.
//! ...stored turns in order...
//! ```

use crate::domain::foundation::TurnId;
use crate::domain::interview::ProblemSnapshot;
use crate::ports::{ChatContext, GatewayTurn};

use super::prompts::{interviewer_instruction, PRIMING_ACKNOWLEDGEMENT};
use super::turn::{Turn, TurnRole};

/// Language label used when code is attached without one.
pub const DEFAULT_CODE_LANGUAGE: &str = "unknown";

/// Builds gateway requests from an interview's stored conversation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAssembler;

impl ContextAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Builds the chat request for `message`.
    ///
    /// `turns` must already be in chronological order. The turn matching
    /// `exclude` (normally the user turn just persisted for `message`) is
    /// skipped so the new message is not sent twice. The history always has
    /// two more entries than the turns it includes.
    pub fn assemble(
        &self,
        snapshot: &ProblemSnapshot,
        turns: &[Turn],
        exclude: Option<TurnId>,
        message: impl Into<String>,
    ) -> ChatContext {
        let mut history = Vec::with_capacity(turns.len() + 2);
        history.push(GatewayTurn::user(interviewer_instruction(snapshot)));
        history.push(GatewayTurn::model(PRIMING_ACKNOWLEDGEMENT));

        history.extend(
            turns
                .iter()
                .filter(|turn| Some(turn.id) != exclude)
                .map(Self::to_gateway_turn),
        );

        ChatContext {
            history,
            message: message.into(),
        }
    }

    fn to_gateway_turn(turn: &Turn) -> GatewayTurn {
        match turn.role {
            TurnRole::Assistant => GatewayTurn::model(turn.content.clone()),
            // The gateway has no system role; system notes are sent as user text.
            TurnRole::User | TurnRole::System => GatewayTurn::user(turn.content.clone()),
        }
    }
}

/// Appends a fenced code block to a candidate message.
///
/// Missing or empty `code` leaves the message untouched. A missing or blank
/// `language` is labelled `unknown`.
pub fn attach_code(content: &str, code: Option<&str>, language: Option<&str>) -> String {
    let code = match code {
        Some(code) if !code.is_empty() => code,
        _ => return content.to_string(),
    };
    let language = language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_CODE_LANGUAGE);

    format!(
        "{content}\n\n[USER ATTACHED CODE ({language})]:\n```{language}\n{code}\n```\n\
         (Please review this code as part of the interview context)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::InterviewId;
    use crate::ports::GatewayRole;
    use serde_json::json;

    fn snapshot() -> ProblemSnapshot {
        ProblemSnapshot::new(json!({"title": "Two Sum"})).unwrap()
    }

    fn log(interview_id: InterviewId) -> Vec<Turn> {
        vec![
            Turn::assistant(interview_id, "Hello! How would you approach this?"),
            Turn::user(interview_id, "Brute force first"),
            Turn::assistant(interview_id, "What is the complexity?"),
        ]
    }

    #[test]
    fn empty_log_yields_only_priming_pair() {
        let ctx = ContextAssembler::new().assemble(&snapshot(), &[], None, "hi");

        assert_eq!(ctx.history.len(), 2);
        assert_eq!(ctx.history[0].role, GatewayRole::User);
        assert!(ctx.history[0].text.contains(r#"{"title":"Two Sum"}"#));
        assert_eq!(ctx.history[1], GatewayTurn::model(PRIMING_ACKNOWLEDGEMENT));
        assert_eq!(ctx.message, "hi");
    }

    #[test]
    fn history_is_turns_plus_two_in_order() {
        let turns = log(InterviewId::new());
        let ctx = ContextAssembler::new().assemble(&snapshot(), &turns, None, "next");

        assert_eq!(ctx.history.len(), turns.len() + 2);
        assert_eq!(
            ctx.history[2],
            GatewayTurn::model("Hello! How would you approach this?")
        );
        assert_eq!(ctx.history[3], GatewayTurn::user("Brute force first"));
        assert_eq!(ctx.history[4], GatewayTurn::model("What is the complexity?"));
    }

    #[test]
    fn excluded_turn_is_not_sent_twice() {
        let interview_id = InterviewId::new();
        let mut turns = log(interview_id);
        let pending = Turn::user(interview_id, "Use a hash map");
        let pending_id = pending.id;
        turns.push(pending);

        let ctx = ContextAssembler::new().assemble(
            &snapshot(),
            &turns,
            Some(pending_id),
            "Use a hash map",
        );

        assert_eq!(ctx.history.len(), 3 + 2);
        assert!(ctx.history.iter().all(|t| t.text != "Use a hash map"));
        assert_eq!(ctx.message, "Use a hash map");
    }

    #[test]
    fn system_turns_are_sent_as_user() {
        let interview_id = InterviewId::new();
        let turns = vec![Turn::new(interview_id, TurnRole::System, "Time check")];
        let ctx = ContextAssembler::new().assemble(&snapshot(), &turns, None, "ok");
        assert_eq!(ctx.history[2], GatewayTurn::user("Time check"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let turns = log(InterviewId::new());
        let a = ContextAssembler::new().assemble(&snapshot(), &turns, None, "m");
        let b = ContextAssembler::new().assemble(&snapshot(), &turns, None, "m");
        assert_eq!(a, b);
    }

    #[test]
    fn attach_code_appends_fenced_block() {
        let content = attach_code("Here is my code", Some("def f(): pass"), Some("python"));
        assert_eq!(
            content,
            "Here is my code\n\n[USER ATTACHED CODE (python)]:\n```python\ndef f(): pass\n```\n\
             (Please review this code as part of the interview context)"
        );
    }

    #[test]
    fn attach_code_defaults_language() {
        let content = attach_code("see", Some("x = 1"), None);
        assert!(content.contains("[USER ATTACHED CODE (unknown)]"));
        assert!(content.contains("```unknown\nx = 1\n```"));

        let blank = attach_code("see", Some("x = 1"), Some("  "));
        assert_eq!(blank, content);
    }

    #[test]
    fn attach_code_ignores_missing_or_empty_code() {
        assert_eq!(attach_code("plain", None, Some("go")), "plain");
        assert_eq!(attach_code("plain", Some(""), Some("go")), "plain");
    }

    #[test]
    fn attachment_changes_only_message_content() {
        let turns = log(InterviewId::new());
        let assembler = ContextAssembler::new();
        let plain = assembler.assemble(&snapshot(), &turns, None, "msg");
        let with_code = assembler.assemble(
            &snapshot(),
            &turns,
            None,
            attach_code("msg", Some("fn main() {}"), Some("rust")),
        );

        assert_eq!(plain.history, with_code.history);
        assert_ne!(plain.message, with_code.message);
        assert!(with_code.message.starts_with("msg"));
    }
}
