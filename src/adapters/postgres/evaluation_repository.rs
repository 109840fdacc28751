//! PostgreSQL implementation of EvaluationRepository.
//!
//! `interview_id` carries a unique constraint; a second insert for the same
//! interview surfaces as `Conflict`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{column, db_error, is_unique_violation};
use crate::domain::evaluation::{Evaluation, ScoreSet};
use crate::domain::foundation::{
    DomainError, ErrorCode, EvaluationId, InterviewId, Score, Timestamp,
};
use crate::ports::EvaluationRepository;

/// PostgreSQL implementation of EvaluationRepository.
#[derive(Clone)]
pub struct PostgresEvaluationRepository {
    pool: PgPool,
}

impl PostgresEvaluationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EvaluationRepository for PostgresEvaluationRepository {
    async fn save(&self, evaluation: &Evaluation) -> Result<(), DomainError> {
        let scores = &evaluation.scores;
        sqlx::query(
            r#"
            INSERT INTO evaluations (
                id, interview_id,
                problem_solving_score, code_quality_score, communication_score,
                technical_score, overall_score,
                strengths, improvements, detailed_feedback, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(evaluation.id.as_uuid())
        .bind(evaluation.interview_id.as_uuid())
        .bind(i16::from(scores.problem_solving_score.value()))
        .bind(i16::from(scores.code_quality_score.value()))
        .bind(i16::from(scores.communication_score.value()))
        .bind(i16::from(scores.technical_score.value()))
        .bind(i16::from(scores.overall_score.value()))
        .bind(Json(&scores.strengths))
        .bind(Json(&scores.improvements))
        .bind(&scores.detailed_feedback)
        .bind(evaluation.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::Conflict,
                    format!(
                        "Interview {} already has an evaluation",
                        evaluation.interview_id
                    ),
                )
                .with_detail("interview_id", evaluation.interview_id.to_string())
            } else {
                db_error("insert evaluation", e)
            }
        })?;

        Ok(())
    }

    async fn find_by_interview(
        &self,
        interview_id: &InterviewId,
    ) -> Result<Option<Evaluation>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, interview_id,
                   problem_solving_score, code_quality_score, communication_score,
                   technical_score, overall_score,
                   strengths, improvements, detailed_feedback, created_at
            FROM evaluations
            WHERE interview_id = $1
            "#,
        )
        .bind(interview_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch evaluation", e))?;

        row.map(row_to_evaluation).transpose()
    }
}

fn score(row: &sqlx::postgres::PgRow, name: &str) -> Result<Score, DomainError> {
    let raw: i16 = column(row, name)?;
    stored_score(name, raw)
}

/// Stored scores are written clamped; anything outside `0..=10` is a corrupt row.
fn stored_score(name: &str, raw: i16) -> Result<Score, DomainError> {
    Score::try_new(i64::from(raw)).map_err(|e| {
        DomainError::database(format!("corrupt evaluation row: {}", e)).with_detail("column", name)
    })
}

fn row_to_evaluation(row: sqlx::postgres::PgRow) -> Result<Evaluation, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let interview_id: uuid::Uuid = column(&row, "interview_id")?;
    let strengths: Json<Vec<String>> = column(&row, "strengths")?;
    let improvements: Json<Vec<String>> = column(&row, "improvements")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;

    Ok(Evaluation {
        id: EvaluationId::from_uuid(id),
        interview_id: InterviewId::from_uuid(interview_id),
        scores: ScoreSet {
            problem_solving_score: score(&row, "problem_solving_score")?,
            code_quality_score: score(&row, "code_quality_score")?,
            communication_score: score(&row, "communication_score")?,
            technical_score: score(&row, "technical_score")?,
            overall_score: score(&row, "overall_score")?,
            strengths: strengths.0,
            improvements: improvements.0,
            detailed_feedback: column(&row, "detailed_feedback")?,
        },
        created_at: Timestamp::from_datetime(created_at),
    })
}
