//! PostgreSQL implementation of InterviewRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{column, db_error, is_unique_violation};
use crate::domain::foundation::{
    DomainError, ErrorCode, InterviewId, InterviewStatus, ProblemId, Timestamp, UserId,
};
use crate::domain::interview::{Interview, ProblemSnapshot};
use crate::ports::InterviewRepository;

/// PostgreSQL implementation of InterviewRepository.
#[derive(Clone)]
pub struct PostgresInterviewRepository {
    pool: PgPool,
}

impl PostgresInterviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewRepository for PostgresInterviewRepository {
    async fn save(&self, interview: &Interview) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO interviews (
                id, user_id, problem_id, problem_snapshot, status,
                provider_session_id, started_at, ended_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(interview.id().as_uuid())
        .bind(interview.user_id().as_str())
        .bind(interview.problem_id().as_uuid())
        .bind(interview.problem_snapshot().as_json())
        .bind(interview.status().as_str())
        .bind(interview.provider_session_id())
        .bind(interview.started_at().as_datetime())
        .bind(interview.ended_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::Conflict,
                    format!("Interview {} already exists", interview.id()),
                )
            } else {
                db_error("insert interview", e)
            }
        })?;

        Ok(())
    }

    async fn update(&self, interview: &Interview) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE interviews SET
                status = $2,
                provider_session_id = $3,
                ended_at = $4
            WHERE id = $1
            "#,
        )
        .bind(interview.id().as_uuid())
        .bind(interview.status().as_str())
        .bind(interview.provider_session_id())
        .bind(interview.ended_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update interview", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InterviewNotFound,
                format!("Interview not found: {}", interview.id()),
            )
            .with_detail("interview_id", interview.id().to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, problem_id, problem_snapshot, status,
                   provider_session_id, started_at, ended_at
            FROM interviews
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch interview", e))?;

        row.map(row_to_interview).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Interview>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, problem_id, problem_snapshot, status,
                   provider_session_id, started_at, ended_at
            FROM interviews
            WHERE user_id = $1
            ORDER BY started_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch interviews by user", e))?;

        rows.into_iter().map(row_to_interview).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn str_to_status(s: &str) -> Result<InterviewStatus, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid interview status: {}", s),
        )
    })
}

fn row_to_interview(row: sqlx::postgres::PgRow) -> Result<Interview, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let user_id: String = column(&row, "user_id")?;
    let problem_id: uuid::Uuid = column(&row, "problem_id")?;
    let snapshot: serde_json::Value = column(&row, "problem_snapshot")?;
    let status: String = column(&row, "status")?;
    let provider_session_id: Option<String> = column(&row, "provider_session_id")?;
    let started_at: chrono::DateTime<chrono::Utc> = column(&row, "started_at")?;
    let ended_at: Option<chrono::DateTime<chrono::Utc>> = column(&row, "ended_at")?;

    Ok(Interview::reconstitute(
        InterviewId::from_uuid(id),
        UserId::new(user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
        })?,
        ProblemId::from_uuid(problem_id),
        ProblemSnapshot::new(snapshot).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid problem_snapshot: {}", e),
            )
        })?,
        str_to_status(&status)?,
        provider_session_id,
        Timestamp::from_datetime(started_at),
        ended_at.map(Timestamp::from_datetime),
    ))
}
