//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `InterviewRepository` - Interview lifecycle records
//! - `MessageRepository` - Append-only conversation log
//! - `SubmissionRepository` - Reviewed code submissions
//! - `EvaluationRepository` - At most one evaluation per interview
//!
//! ## Model Port
//!
//! - `ModelGateway` - Chat and one-shot text generation

mod evaluation_repository;
mod interview_repository;
mod message_repository;
mod model_gateway;
mod submission_repository;

pub use evaluation_repository::EvaluationRepository;
pub use interview_repository::InterviewRepository;
pub use message_repository::MessageRepository;
pub use model_gateway::{ChatContext, GatewayError, GatewayRole, GatewayTurn, ModelGateway};
pub use submission_repository::SubmissionRepository;
