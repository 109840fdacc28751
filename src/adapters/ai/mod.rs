//! Model gateway adapters.
//!
//! Implementations of the `ModelGateway` port.
//!
//! ## Available Adapters
//!
//! - `GeminiGateway` - Google Gemini `generateContent` API
//! - `MockModelGateway` - Scripted gateway for tests and local runs

mod gemini_gateway;
mod mock_gateway;

pub use gemini_gateway::{GeminiConfig, GeminiGateway, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
pub use mock_gateway::{GatewayCall, MockModelGateway, DEFAULT_MOCK_REPLY};
