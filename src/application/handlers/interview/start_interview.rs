//! StartInterviewHandler - Command handler for opening an interview.

use std::sync::Arc;

use crate::domain::conversation::{greeting_prompt, Turn, FALLBACK_GREETING};
use crate::domain::foundation::{ProblemId, UserId};
use crate::domain::interview::{Interview, InterviewError, ProblemSnapshot};
use crate::ports::{InterviewRepository, MessageRepository, ModelGateway};

/// Command to start a new interview.
#[derive(Debug, Clone)]
pub struct StartInterviewCommand {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub problem_snapshot: ProblemSnapshot,
}

/// Result of a started interview.
#[derive(Debug, Clone)]
pub struct StartInterviewResult {
    pub interview: Interview,
    /// First assistant turn of the conversation.
    pub greeting: Turn,
    /// True when the model failed and the fixed greeting was used.
    pub fallback_used: bool,
}

/// Handler for starting interviews.
///
/// The interview exists even if the greeting cannot be generated.
pub struct StartInterviewHandler {
    interviews: Arc<dyn InterviewRepository>,
    messages: Arc<dyn MessageRepository>,
    gateway: Arc<dyn ModelGateway>,
}

impl StartInterviewHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        messages: Arc<dyn MessageRepository>,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            interviews,
            messages,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartInterviewCommand,
    ) -> Result<StartInterviewResult, InterviewError> {
        // 1. Create and persist the interview
        let interview = Interview::start(cmd.user_id, cmd.problem_id, cmd.problem_snapshot);
        self.interviews.save(&interview).await?;

        // 2. Ask the model for a greeting, falling back on any failure
        let prompt = greeting_prompt(interview.problem_snapshot());
        let (text, fallback_used) = match self.gateway.generate_once(&prompt).await {
            Ok(text) if !text.trim().is_empty() => (text, false),
            Ok(_) => {
                tracing::warn!(
                    interview_id = %interview.id(),
                    "Model returned an empty greeting, using fallback"
                );
                (FALLBACK_GREETING.to_string(), true)
            }
            Err(err) => {
                tracing::warn!(
                    interview_id = %interview.id(),
                    error = %err,
                    "Greeting generation failed, using fallback"
                );
                (FALLBACK_GREETING.to_string(), true)
            }
        };

        // 3. Persist the greeting as the first assistant turn
        let greeting = Turn::assistant(*interview.id(), text);
        self.messages.append(&greeting).await?;

        tracing::info!(
            interview_id = %interview.id(),
            user_id = %interview.user_id(),
            problem_id = %interview.problem_id(),
            fallback_used,
            "Interview started"
        );

        Ok(StartInterviewResult {
            interview,
            greeting,
            fallback_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryInterviewStore;
    use crate::application::handlers::interview::test_support::{
        candidate, gateway, two_sum_snapshot, FlakyStore,
    };
    use crate::domain::conversation::TurnRole;
    use crate::domain::foundation::InterviewStatus;
    use crate::ports::GatewayError;

    fn command() -> StartInterviewCommand {
        StartInterviewCommand {
            user_id: candidate(),
            problem_id: ProblemId::new(),
            problem_snapshot: two_sum_snapshot(),
        }
    }

    fn handler(
        store: &InMemoryInterviewStore,
        gateway: &crate::adapters::ai::MockModelGateway,
    ) -> StartInterviewHandler {
        StartInterviewHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(gateway.clone()),
        )
    }

    #[tokio::test]
    async fn creates_active_interview_with_greeting() {
        let store = InMemoryInterviewStore::new();
        let gateway = gateway().with_response("Hi! How would you approach Two Sum?");

        let result = handler(&store, &gateway).handle(command()).await.unwrap();

        assert_eq!(result.interview.status(), InterviewStatus::Active);
        assert!(result.interview.ended_at().is_none());
        assert_eq!(result.greeting.content, "Hi! How would you approach Two Sum?");
        assert!(!result.fallback_used);

        let turns = MessageRepository::list_by_interview(&store, result.interview.id())
            .await
            .unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, TurnRole::Assistant);
        assert_eq!(turns[0].id, result.greeting.id);
    }

    #[tokio::test]
    async fn greeting_prompt_embeds_snapshot() {
        let store = InMemoryInterviewStore::new();
        let gateway = gateway();

        handler(&store, &gateway).handle(command()).await.unwrap();

        let call = gateway.last_call().unwrap();
        let prompt = call.as_once().unwrap();
        assert!(prompt.contains(r#"{"title":"Two Sum"}"#));
        assert!(prompt.ends_with("explain their initial thought process."));
    }

    #[tokio::test]
    async fn gateway_failure_uses_fallback_greeting() {
        let store = InMemoryInterviewStore::new();
        let gateway = gateway().with_error(GatewayError::unavailable("down"));

        let result = handler(&store, &gateway).handle(command()).await.unwrap();

        assert!(result.fallback_used);
        assert_eq!(result.greeting.content, FALLBACK_GREETING);
        assert_eq!(store.interview_count().await, 1);
        assert_eq!(store.turn_count(result.interview.id()).await, 1);
    }

    #[tokio::test]
    async fn blank_greeting_uses_fallback() {
        let store = InMemoryInterviewStore::new();
        let gateway = gateway().with_response("   ");

        let result = handler(&store, &gateway).handle(command()).await.unwrap();
        assert_eq!(result.greeting.content, FALLBACK_GREETING);
    }

    #[tokio::test]
    async fn store_failure_aborts_before_gateway_call() {
        let store = FlakyStore::new();
        store.fail_interview_writes();
        let gateway = gateway();
        let handler = StartInterviewHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(gateway.clone()),
        );

        let err = handler.handle(command()).await.unwrap_err();

        assert!(matches!(err, InterviewError::Infrastructure(_)));
        assert_eq!(gateway.call_count(), 0);
        assert_eq!(store.inner.interview_count().await, 0);
    }
}
