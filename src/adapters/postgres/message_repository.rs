//! PostgreSQL implementation of MessageRepository.
//!
//! `created_at` is kept strictly increasing per interview: an insert whose
//! clock reading is not past the latest stored turn is stamped one
//! microsecond after it. `seq` (BIGSERIAL) breaks the ties left by
//! concurrent inserts.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{column, db_error};
use crate::domain::conversation::{Turn, TurnRole};
use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, Timestamp, TurnId};
use crate::ports::MessageRepository;

/// PostgreSQL implementation of MessageRepository.
#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn append(&self, turn: &Turn) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, interview_id, role, content, created_at)
            SELECT $1, $2, $3, $4, GREATEST(
                $5,
                COALESCE(
                    (SELECT MAX(created_at) + INTERVAL '1 microsecond'
                     FROM messages WHERE interview_id = $2),
                    $5
                )
            )
            "#,
        )
        .bind(turn.id.as_uuid())
        .bind(turn.interview_id.as_uuid())
        .bind(turn.role.as_str())
        .bind(&turn.content)
        .bind(turn.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert message", e))?;

        Ok(())
    }

    async fn list_by_interview(&self, interview_id: &InterviewId) -> Result<Vec<Turn>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, interview_id, role, content, created_at
            FROM messages
            WHERE interview_id = $1
            ORDER BY created_at ASC, seq ASC
            "#,
        )
        .bind(interview_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch messages", e))?;

        rows.into_iter().map(row_to_turn).collect()
    }
}

fn row_to_turn(row: sqlx::postgres::PgRow) -> Result<Turn, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let interview_id: uuid::Uuid = column(&row, "interview_id")?;
    let role: String = column(&row, "role")?;
    let content: String = column(&row, "content")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    let role: TurnRole = role
        .parse()
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("{}", e)))?;

    Ok(Turn {
        id: TurnId::from_uuid(id),
        interview_id: InterviewId::from_uuid(interview_id),
        role,
        content,
        created_at: Timestamp::from_datetime(created_at),
    })
}
