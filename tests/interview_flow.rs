//! Integration tests for the interview workflows.
//!
//! These tests drive `InterviewFacade` end to end over the in-memory store and
//! a scripted model gateway:
//! 1. The Two Sum walkthrough (start, chat, end, end again)
//! 2. Lifecycle rules (terminal states, ended_at bookkeeping)
//! 3. Conversation ordering and context shape
//! 4. Tolerant evaluation decoding

use serde_json::json;
use std::sync::Arc;

use mock_interviewer::adapters::ai::{GatewayCall, MockModelGateway};
use mock_interviewer::adapters::memory::InMemoryInterviewStore;
use mock_interviewer::application::InterviewFacade;
use mock_interviewer::domain::conversation::{TurnRole, FALLBACK_GREETING};
use mock_interviewer::domain::foundation::{InterviewId, InterviewStatus};
use mock_interviewer::domain::interview::InterviewError;
use mock_interviewer::ports::GatewayError;

// =============================================================================
// Test Infrastructure
// =============================================================================

const PROBLEM_ID: &str = "4f1c2a3e-9a43-4b8e-9d0e-2f7c3d1b5a6c";

const EVALUATION_REPLY: &str = r#"```json
{
  "problem_solving_score": 8,
  "code_quality_score": 7,
  "communication_score": 9,
  "technical_score": 8,
  "overall_score": 8,
  "strengths": ["Chose a hash map quickly", "Explained trade-offs"],
  "improvements": ["Mention edge cases earlier"],
  "detailed_feedback": "Solid interview."
}
```"#;

struct Harness {
    store: InMemoryInterviewStore,
    gateway: MockModelGateway,
    facade: InterviewFacade,
}

fn harness() -> Harness {
    let store = InMemoryInterviewStore::new();
    let gateway = MockModelGateway::new();
    let facade = InterviewFacade::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(gateway.clone()),
    );
    Harness {
        store,
        gateway,
        facade,
    }
}

async fn start_two_sum(h: &Harness) -> String {
    h.gateway
        .push_response("Hi! Walk me through how you'd approach Two Sum.");
    h.facade
        .start_interview("candidate-1", PROBLEM_ID, json!({"title": "Two Sum"}))
        .await
        .unwrap()
        .interview
        .id()
        .to_string()
}

// =============================================================================
// Two Sum walkthrough
// =============================================================================

#[tokio::test]
async fn two_sum_walkthrough() {
    let h = harness();

    // Start: active interview with one greeting turn.
    let id = start_two_sum(&h).await;
    let interview_id: InterviewId = id.parse().unwrap();
    let details = h.facade.get_interview(&id).await.unwrap();
    assert_eq!(details.interview.status(), InterviewStatus::Active);
    assert_eq!(details.turns.len(), 1);
    assert_eq!(details.turns[0].role, TurnRole::Assistant);

    // Send: user turn and reply appended, still active.
    h.gateway.push_response("Great, what's the complexity?");
    let sent = h
        .facade
        .send_message(&id, "I'll use a hash map", None, None)
        .await
        .unwrap();
    assert_eq!(sent.reply.content, "Great, what's the complexity?");
    assert_eq!(h.store.turn_count(&interview_id).await, 3);
    let details = h.facade.get_interview(&id).await.unwrap();
    assert_eq!(details.interview.status(), InterviewStatus::Active);

    // End: completed with exactly one evaluation.
    h.gateway.push_response(EVALUATION_REPLY);
    let first = h.facade.end_interview(&id).await.unwrap();
    assert!(first.parsed);
    assert!(!first.already_evaluated);
    assert_eq!(first.evaluation.overall_score().value(), 8);
    assert_eq!(first.evaluation.detailed_feedback(), "Solid interview.");
    assert_eq!(first.evaluation.interview_id, interview_id);

    let details = h.facade.get_interview(&id).await.unwrap();
    assert_eq!(details.interview.status(), InterviewStatus::Completed);
    assert!(details.interview.ended_at().is_some());
    assert_eq!(h.store.evaluation_count().await, 1);

    // End again: same evaluation, no new row, no model call.
    let calls_before = h.gateway.call_count();
    let second = h.facade.end_interview(&id).await.unwrap();
    assert!(second.already_evaluated);
    assert_eq!(second.evaluation.id, first.evaluation.id);
    assert_eq!(second.evaluation.scores, first.evaluation.scores);
    assert_eq!(h.store.evaluation_count().await, 1);
    assert_eq!(h.gateway.call_count(), calls_before);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn greeting_falls_back_when_gateway_fails() {
    let h = harness();
    h.gateway.push_error(GatewayError::unavailable("503"));

    let started = h
        .facade
        .start_interview("candidate-1", PROBLEM_ID, json!({"title": "Two Sum"}))
        .await
        .unwrap();

    assert!(started.fallback_used);
    assert_eq!(started.greeting.content, FALLBACK_GREETING);
    let history = h
        .facade
        .get_history(&started.interview.id().to_string())
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn send_after_end_is_rejected_without_new_turn() {
    let h = harness();
    let id = start_two_sum(&h).await;
    h.gateway.push_response(EVALUATION_REPLY);
    h.facade.end_interview(&id).await.unwrap();
    let before = h.facade.get_history(&id).await.unwrap().len();

    let err = h
        .facade
        .send_message(&id, "one more thing", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, InterviewError::InvalidState(_)));
    assert_eq!(h.facade.get_history(&id).await.unwrap().len(), before);
}

#[tokio::test]
async fn abandoned_interview_rejects_messages_and_end() {
    let h = harness();
    let id = start_two_sum(&h).await;

    let abandoned = h.facade.abandon_interview(&id).await.unwrap();
    assert_eq!(abandoned.status(), InterviewStatus::Abandoned);
    assert!(abandoned.ended_at().is_some());

    assert!(matches!(
        h.facade.send_message(&id, "hello?", None, None).await,
        Err(InterviewError::InvalidState(_))
    ));
    assert!(matches!(
        h.facade.end_interview(&id).await,
        Err(InterviewError::InvalidState(_))
    ));
    assert!(matches!(
        h.facade.submit_code(&id, "pass", None).await,
        Err(InterviewError::InvalidState(_))
    ));
}

#[tokio::test]
async fn ended_at_tracks_status() {
    let h = harness();
    let id = start_two_sum(&h).await;

    let active = h.facade.get_interview(&id).await.unwrap().interview;
    assert!(active.ended_at().is_none());

    h.gateway.push_response(EVALUATION_REPLY);
    h.facade.end_interview(&id).await.unwrap();
    let completed = h.facade.get_interview(&id).await.unwrap().interview;
    assert!(completed.ended_at().is_some());
    assert!(completed.is_consistent());
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let h = harness();

    let missing = InterviewId::new().to_string();
    assert!(matches!(
        h.facade.get_history(&missing).await,
        Err(InterviewError::NotFound(_))
    ));
    assert!(matches!(
        h.facade.end_interview("not-a-uuid").await,
        Err(InterviewError::InvalidArgument { .. })
    ));
    assert_eq!(h.gateway.call_count(), 0);
}

#[tokio::test]
async fn list_interviews_is_scoped_to_user() {
    let h = harness();
    start_two_sum(&h).await;
    start_two_sum(&h).await;
    h.facade
        .start_interview("someone-else", PROBLEM_ID, json!({"title": "Two Sum"}))
        .await
        .unwrap();

    let mine = h.facade.list_interviews("candidate-1").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].started_at() >= mine[1].started_at());
}

// =============================================================================
// Conversation
// =============================================================================

#[tokio::test]
async fn history_is_ordered_and_complete() {
    let h = harness();
    let id = start_two_sum(&h).await;
    for message in ["first", "second", "third"] {
        h.facade.send_message(&id, message, None, None).await.unwrap();
    }

    let history = h.facade.get_history(&id).await.unwrap();
    assert_eq!(history.len(), 7);
    assert!(history
        .windows(2)
        .all(|pair| pair[0].created_at < pair[1].created_at));

    let user_messages: Vec<&str> = history
        .iter()
        .filter(|t| t.role == TurnRole::User)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(user_messages, vec!["first", "second", "third"]);

    let mut ids: Vec<_> = history.iter().map(|t| t.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), history.len());
}

#[tokio::test]
async fn context_has_priming_pair_plus_prior_turns() {
    let h = harness();
    let id = start_two_sum(&h).await;
    h.facade
        .send_message(&id, "brute force first", None, None)
        .await
        .unwrap();
    h.facade
        .send_message(&id, "then a hash map", Some("seen = {}".into()), Some("python".into()))
        .await
        .unwrap();

    let call = h.gateway.last_call().unwrap();
    let context = call.as_reply().unwrap();
    // greeting, user, reply were stored before this message
    assert_eq!(context.history.len(), 3 + 2);
    assert!(context.message.starts_with("then a hash map"));
    assert!(context.message.contains("```python\nseen = {}\n```"));
    assert!(context
        .history
        .iter()
        .all(|turn| !turn.text.contains("then a hash map")));
}

#[tokio::test]
async fn gateway_failure_keeps_dangling_user_turn() {
    let h = harness();
    let id = start_two_sum(&h).await;
    h.gateway.push_error(GatewayError::rate_limited(30));

    let err = h
        .facade
        .send_message(&id, "are you there?", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, InterviewError::Gateway(_)));
    let history = h.facade.get_history(&id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].content, "are you there?");
}

// =============================================================================
// Evaluation decoding
// =============================================================================

#[tokio::test]
async fn malformed_evaluation_yields_empty_scorecard() {
    let h = harness();
    let id = start_two_sum(&h).await;
    h.gateway
        .push_response("The candidate did well overall, I'd say 8/10.");

    let result = h.facade.end_interview(&id).await.unwrap();

    assert!(!result.parsed);
    assert!(result.evaluation.scores.is_empty());
    assert_eq!(result.evaluation.overall_score().value(), 0);
    let details = h.facade.get_interview(&id).await.unwrap();
    assert_eq!(details.interview.status(), InterviewStatus::Completed);
    assert!(details.evaluation.is_some());
}

#[tokio::test]
async fn evaluation_prompt_includes_transcript_and_submissions() {
    let h = harness();
    let id = start_two_sum(&h).await;
    h.facade
        .send_message(&id, "I'll use a hash map", None, None)
        .await
        .unwrap();
    h.gateway
        .push_response(r#"{"is_correct": true, "feedback": "Correct and O(n)."}"#);
    let submitted = h
        .facade
        .submit_code(&id, "def two_sum(nums, t): ...", Some("python".into()))
        .await
        .unwrap();
    assert_eq!(submitted.submission.is_correct, Some(true));

    h.gateway.push_response(EVALUATION_REPLY);
    h.facade.end_interview(&id).await.unwrap();

    let prompt = match h.gateway.last_call().unwrap() {
        GatewayCall::Once(prompt) => prompt,
        other => panic!("expected one-shot call, got {:?}", other),
    };
    assert!(prompt.contains("[user]: I'll use a hash map"));
    assert!(prompt.contains("Code (python): def two_sum(nums, t): ..."));
    assert!(prompt.contains("Correct and O(n)."));
}
