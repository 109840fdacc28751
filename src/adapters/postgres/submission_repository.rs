//! PostgreSQL implementation of SubmissionRepository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{column, db_error};
use crate::domain::foundation::{DomainError, InterviewId, SubmissionId, Timestamp};
use crate::domain::submission::{Submission, TestResult};
use crate::ports::SubmissionRepository;

/// PostgreSQL implementation of SubmissionRepository.
#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn append(&self, submission: &Submission) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, interview_id, code, language, ai_feedback,
                is_correct, test_results, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(submission.id.as_uuid())
        .bind(submission.interview_id.as_uuid())
        .bind(&submission.code)
        .bind(&submission.language)
        .bind(&submission.ai_feedback)
        .bind(submission.is_correct)
        .bind(Json(&submission.test_results))
        .bind(submission.submitted_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert submission", e))?;

        Ok(())
    }

    async fn list_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Vec<Submission>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, interview_id, code, language, ai_feedback,
                   is_correct, test_results, submitted_at
            FROM submissions
            WHERE interview_id = $1
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(interview_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch submissions", e))?;

        rows.into_iter().map(row_to_submission).collect()
    }
}

fn row_to_submission(row: sqlx::postgres::PgRow) -> Result<Submission, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let interview_id: uuid::Uuid = column(&row, "interview_id")?;
    let test_results: Json<Vec<TestResult>> = column(&row, "test_results")?;
    let submitted_at: chrono::DateTime<chrono::Utc> = column(&row, "submitted_at")?;

    Ok(Submission {
        id: SubmissionId::from_uuid(id),
        interview_id: InterviewId::from_uuid(interview_id),
        code: column(&row, "code")?,
        language: column(&row, "language")?,
        ai_feedback: column(&row, "ai_feedback")?,
        is_correct: column(&row, "is_correct")?,
        test_results: test_results.0,
        submitted_at: Timestamp::from_datetime(submitted_at),
    })
}
