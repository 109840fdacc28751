//! SendMessageHandler - Command handler for one candidate chat turn.

use std::sync::Arc;

use crate::domain::conversation::{attach_code, ContextAssembler, Turn};
use crate::domain::foundation::InterviewId;
use crate::domain::interview::InterviewError;
use crate::ports::{InterviewRepository, MessageRepository, ModelGateway};

/// Command to send a candidate message, optionally with code attached.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub interview_id: InterviewId,
    pub content: String,
    pub code: Option<String>,
    pub language: Option<String>,
}

/// Result of a chat turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// The persisted candidate turn (with any code block embedded).
    pub user_turn: Turn,
    /// The persisted interviewer reply.
    pub reply: Turn,
}

/// Handler for chat turns.
///
/// The candidate turn is committed before the model is called; a gateway
/// failure leaves it stored without a reply.
pub struct SendMessageHandler {
    interviews: Arc<dyn InterviewRepository>,
    messages: Arc<dyn MessageRepository>,
    gateway: Arc<dyn ModelGateway>,
    assembler: ContextAssembler,
}

impl SendMessageHandler {
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        messages: Arc<dyn MessageRepository>,
        gateway: Arc<dyn ModelGateway>,
    ) -> Self {
        Self {
            interviews,
            messages,
            gateway,
            assembler: ContextAssembler::new(),
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, InterviewError> {
        if cmd.content.trim().is_empty() {
            return Err(InterviewError::invalid_argument(
                "content",
                "Message content cannot be empty",
            ));
        }

        // 1. Load and check the interview accepts chat
        let interview = self
            .interviews
            .find_by_id(&cmd.interview_id)
            .await?
            .ok_or(InterviewError::NotFound(cmd.interview_id))?;
        interview.ensure_active()?;

        // 2. Persist the candidate turn
        let content = attach_code(&cmd.content, cmd.code.as_deref(), cmd.language.as_deref());
        let user_turn = Turn::user(cmd.interview_id, content);
        self.messages.append(&user_turn).await?;

        // 3. Assemble context from the stored log, minus the turn just added
        let turns = self.messages.list_by_interview(&cmd.interview_id).await?;
        let context = self.assembler.assemble(
            interview.problem_snapshot(),
            &turns,
            Some(user_turn.id),
            user_turn.content.clone(),
        );
        tracing::debug!(
            interview_id = %cmd.interview_id,
            history_len = context.history.len(),
            "Assembled chat context"
        );

        // 4. Ask the model
        let text = self.gateway.generate_reply(context).await.map_err(|err| {
            tracing::warn!(
                interview_id = %cmd.interview_id,
                turn_id = %user_turn.id,
                error = %err,
                "Reply generation failed, candidate turn left unanswered"
            );
            InterviewError::from(err)
        })?;

        // 5. Persist the reply
        let reply = Turn::assistant(cmd.interview_id, text);
        self.messages.append(&reply).await?;

        Ok(SendMessageResult { user_turn, reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockModelGateway;
    use crate::adapters::memory::InMemoryInterviewStore;
    use crate::application::handlers::interview::test_support::{gateway, seeded_interview};
    use crate::domain::conversation::{TurnRole, PRIMING_ACKNOWLEDGEMENT};
    use crate::ports::{GatewayError, GatewayTurn};

    fn handler(store: &InMemoryInterviewStore, gateway: &MockModelGateway) -> SendMessageHandler {
        SendMessageHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(gateway.clone()),
        )
    }

    fn message(interview_id: InterviewId, content: &str) -> SendMessageCommand {
        SendMessageCommand {
            interview_id,
            content: content.to_string(),
            code: None,
            language: None,
        }
    }

    #[tokio::test]
    async fn persists_user_turn_and_reply() {
        let store = InMemoryInterviewStore::new();
        let interview = seeded_interview(&store).await;
        let gateway = gateway().with_response("What is the time complexity?");

        let result = handler(&store, &gateway)
            .handle(message(*interview.id(), "I'll use a hash map"))
            .await
            .unwrap();

        assert_eq!(result.user_turn.role, TurnRole::User);
        assert_eq!(result.reply.role, TurnRole::Assistant);
        assert_eq!(result.reply.content, "What is the time complexity?");

        let turns = MessageRepository::list_by_interview(&store, interview.id())
            .await
            .unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].id, result.user_turn.id);
        assert_eq!(turns[1].id, result.reply.id);
    }

    #[tokio::test]
    async fn sends_new_message_separately_from_history() {
        let store = InMemoryInterviewStore::new();
        let interview = seeded_interview(&store).await;
        MessageRepository::append(&store, &Turn::assistant(*interview.id(), "Hello!"))
            .await
            .unwrap();
        let gateway = gateway();

        handler(&store, &gateway)
            .handle(message(*interview.id(), "I'll use a hash map"))
            .await
            .unwrap();

        let call = gateway.last_call().unwrap();
        let ctx = call.as_reply().unwrap();
        assert_eq!(ctx.history.len(), 1 + 2);
        assert_eq!(ctx.history[1], GatewayTurn::model(PRIMING_ACKNOWLEDGEMENT));
        assert_eq!(ctx.history[2], GatewayTurn::model("Hello!"));
        assert_eq!(ctx.message, "I'll use a hash map");
    }

    #[tokio::test]
    async fn attached_code_is_stored_and_sent() {
        let store = InMemoryInterviewStore::new();
        let interview = seeded_interview(&store).await;
        let gateway = gateway();

        let mut cmd = message(*interview.id(), "Here is my solution");
        cmd.code = Some("def two_sum(nums, target): ...".to_string());
        cmd.language = Some("python".to_string());

        let result = handler(&store, &gateway).handle(cmd).await.unwrap();

        assert!(result
            .user_turn
            .content
            .contains("[USER ATTACHED CODE (python)]:\n```python\ndef two_sum"));
        let call = gateway.last_call().unwrap();
        assert_eq!(call.as_reply().unwrap().message, result.user_turn.content);
        assert_eq!(store.turn_count(interview.id()).await, 2);
    }

    #[tokio::test]
    async fn rejects_completed_interview_without_appending() {
        let store = InMemoryInterviewStore::new();
        let mut interview = seeded_interview(&store).await;
        interview.complete().unwrap();
        store.update(&interview).await.unwrap();
        let gateway = gateway();

        let err = handler(&store, &gateway)
            .handle(message(*interview.id(), "hello?"))
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::InvalidState(_)));
        assert_eq!(store.turn_count(interview.id()).await, 0);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn rejects_abandoned_interview() {
        let store = InMemoryInterviewStore::new();
        let mut interview = seeded_interview(&store).await;
        interview.abandon().unwrap();
        store.update(&interview).await.unwrap();

        let err = handler(&store, &gateway())
            .handle(message(*interview.id(), "hello?"))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::InvalidState(_)));
    }

    #[tokio::test]
    async fn unknown_interview_is_not_found() {
        let store = InMemoryInterviewStore::new();
        let id = InterviewId::new();

        let err = handler(&store, &gateway())
            .handle(message(id, "hello"))
            .await
            .unwrap_err();
        assert_eq!(err, InterviewError::NotFound(id));
    }

    #[tokio::test]
    async fn empty_content_is_invalid() {
        let store = InMemoryInterviewStore::new();
        let interview = seeded_interview(&store).await;

        let err = handler(&store, &gateway())
            .handle(message(*interview.id(), "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn gateway_failure_leaves_user_turn_unanswered() {
        let store = InMemoryInterviewStore::new();
        let interview = seeded_interview(&store).await;
        let gateway = gateway().with_error(GatewayError::AuthenticationFailed);

        let err = handler(&store, &gateway)
            .handle(message(*interview.id(), "I'll use a hash map"))
            .await
            .unwrap_err();

        assert!(matches!(err, InterviewError::Gateway(_)));
        let turns = MessageRepository::list_by_interview(&store, interview.id())
            .await
            .unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, TurnRole::User);
    }
}
