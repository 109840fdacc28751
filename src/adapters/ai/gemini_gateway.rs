//! Gemini Gateway - Implementation of ModelGateway for Google's Gemini API.
//!
//! Both gateway operations map to a single `generateContent` call:
//!
//! - `generate_reply` sends the history followed by the new user message
//! - `generate_once` sends one user message containing the prompt
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-1.5-pro")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let gateway = GeminiGateway::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ChatContext, GatewayError, GatewayRole, GatewayTurn, ModelGateway};

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

/// Default Generative Language API endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the Gemini gateway.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini REST gateway.
pub struct GeminiGateway {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGateway {
    /// Creates a gateway with an HTTP client bound to the configured timeout.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the HTTP client cannot be built
    pub fn new(config: GeminiConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::invalid_request(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn to_gemini_request(history: &[GatewayTurn], message: &str) -> GeminiRequest {
        let mut contents: Vec<GeminiContent> = history.iter().map(GeminiContent::from).collect();
        contents.push(GeminiContent::from(&GatewayTurn::user(message)));
        GeminiRequest { contents }
    }

    async fn send_request(&self, request: &GeminiRequest) -> Result<Response, GatewayError> {
        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GatewayError::network(format!("Connection failed: {}", e))
                } else {
                    GatewayError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        Err(Self::status_error(status.as_u16(), retry_after, error_body))
    }

    fn status_error(status: u16, retry_after: Option<u32>, error_body: String) -> GatewayError {
        match status {
            401 | 403 => GatewayError::AuthenticationFailed,
            400 if error_body.contains("API_KEY_INVALID") => GatewayError::AuthenticationFailed,
            400 => GatewayError::InvalidRequest(error_body),
            429 => GatewayError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
            500..=599 => {
                GatewayError::unavailable(format!("Server error {}: {}", status, error_body))
            }
            _ => GatewayError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    async fn parse_response(response: Response) -> Result<String, GatewayError> {
        let response = Self::handle_response_status(response).await?;
        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::parse(format!("Failed to parse response: {}", e)))?;
        body.into_text()
    }

    async fn generate(&self, request: GeminiRequest) -> Result<String, GatewayError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(&request).await {
                Ok(response) => Self::parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(text) => return Ok(text),
                Err(err) if !err.is_retryable() || retry_count >= self.config.max_retries => {
                    return Err(err);
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        attempt = retry_count + 1,
                        model = %self.config.model,
                        "Gemini request failed, retrying"
                    );
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            sleep(Duration::from_secs(1 << retry_count.min(5))).await;
            retry_count += 1;
        }
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate_reply(&self, context: ChatContext) -> Result<String, GatewayError> {
        tracing::debug!(
            history_len = context.history.len(),
            model = %self.config.model,
            "Sending chat request to Gemini"
        );
        self.generate(Self::to_gemini_request(&context.history, &context.message))
            .await
    }

    async fn generate_once(&self, prompt: &str) -> Result<String, GatewayError> {
        self.generate(Self::to_gemini_request(&[], prompt)).await
    }
}

// ----- Gemini API Types -----

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl From<&GatewayTurn> for GeminiContent {
    fn from(turn: &GatewayTurn) -> Self {
        let role = match turn.role {
            GatewayRole::User => "user",
            GatewayRole::Model => "model",
        };
        Self {
            role: Some(role.to_string()),
            parts: vec![GeminiPart {
                text: Some(turn.text.clone()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, GatewayError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GatewayError::invalid_request(format!(
                "prompt blocked: {}",
                reason
            )));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(GatewayError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}
