//! Mock Model Gateway for testing.
//!
//! Returns scripted replies in order and records every call, so tests can run
//! the interview workflows without calling a real model.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockModelGateway::new()
//!     .with_response("Hello! Walk me through your approach.")
//!     .with_error(GatewayError::AuthenticationFailed);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ChatContext, GatewayError, ModelGateway};

/// Reply returned once the script is exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Mock response";

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Reply(ChatContext),
    Once(String),
}

impl GatewayCall {
    pub fn as_reply(&self) -> Option<&ChatContext> {
        match self {
            GatewayCall::Reply(ctx) => Some(ctx),
            GatewayCall::Once(_) => None,
        }
    }

    pub fn as_once(&self) -> Option<&str> {
        match self {
            GatewayCall::Once(prompt) => Some(prompt),
            GatewayCall::Reply(_) => None,
        }
    }
}

/// Scripted model gateway.
///
/// Clones share the script and the call log.
#[derive(Debug, Clone, Default)]
pub struct MockModelGateway {
    responses: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<GatewayCall>>>,
}

impl MockModelGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: GatewayError) -> Self {
        self.push(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a reply on an already shared gateway.
    pub fn push_response(&self, text: impl Into<String>) {
        self.push(Ok(text.into()));
    }

    /// Queues a failure on an already shared gateway.
    pub fn push_error(&self, error: GatewayError) {
        self.push(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> Option<GatewayCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn push(&self, response: Result<String, GatewayError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    async fn respond(&self, call: GatewayCall) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(call);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_REPLY.to_string()))
    }
}

#[async_trait]
impl ModelGateway for MockModelGateway {
    async fn generate_reply(&self, context: ChatContext) -> Result<String, GatewayError> {
        self.respond(GatewayCall::Reply(context)).await
    }

    async fn generate_once(&self, prompt: &str) -> Result<String, GatewayError> {
        self.respond(GatewayCall::Once(prompt.to_string())).await
    }
}
