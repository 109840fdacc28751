//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `interview` - Interview aggregate and lifecycle state machine
//! - `conversation` - Turn log, prompt templates and context assembly
//! - `evaluation` - End-of-interview scorecard and its extraction
//! - `submission` - Code submissions and review extraction

pub mod conversation;
pub mod evaluation;
pub mod foundation;
pub mod interview;
pub mod submission;
