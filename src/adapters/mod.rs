//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Model gateway implementations (Gemini, mock)
//! - `memory` - In-process store for tests and local development
//! - `postgres` - PostgreSQL-backed repositories
//! - `http` - REST API

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;

pub use ai::{GeminiConfig, GeminiGateway, MockModelGateway};
pub use memory::InMemoryInterviewStore;
pub use postgres::{
    PostgresEvaluationRepository, PostgresInterviewRepository, PostgresMessageRepository,
    PostgresSubmissionRepository,
};
