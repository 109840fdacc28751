//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresInterviewRepository` - Interview lifecycle records
//! - `PostgresMessageRepository` - Append-only conversation log
//! - `PostgresSubmissionRepository` - Reviewed code submissions
//! - `PostgresEvaluationRepository` - One scorecard per interview
//!
//! Schema lives in `migrations/`.

mod evaluation_repository;
mod interview_repository;
mod message_repository;
mod submission_repository;

pub use evaluation_repository::PostgresEvaluationRepository;
pub use interview_repository::PostgresInterviewRepository;
pub use message_repository::PostgresMessageRepository;
pub use submission_repository::PostgresSubmissionRepository;

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wraps a driver error with the operation that failed.
fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", action, e),
    )
}

/// Reads a column, mapping decode failures to `DatabaseError`.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
