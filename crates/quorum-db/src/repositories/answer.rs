//! PostgreSQL implementation of AnswerRepository
//!
//! Answer listings always lead with the confirmed flag: the accepted
//! answer sorts first regardless of rank, then rank and recency apply.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quorum_core::entities::{Answer, Ranked, VoteTargetKind};
use quorum_core::traits::{AnswerRepository, RepoResult};
use quorum_core::value_objects::Snowflake;

use crate::models::{AnswerModel, RankedAnswerModel};

use super::error::map_db_error;

/// PostgreSQL implementation of AnswerRepository
#[derive(Clone)]
pub struct PgAnswerRepository {
    pool: PgPool,
}

impl PgAnswerRepository {
    /// Create a new PgAnswerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerRepository for PgAnswerRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>> {
        let result = sqlx::query_as::<_, AnswerModel>(
            r#"
            SELECT id, text, author_id, question_id, confirmed, created_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Answer::from))
    }

    #[instrument(skip(self, answer))]
    async fn create(&self, answer: &Answer) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO answers (id, text, author_id, question_id, confirmed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(answer.id.into_inner())
        .bind(&answer.text)
        .bind(answer.author_id.map(Snowflake::into_inner))
        .bind(answer.question_id.into_inner())
        .bind(answer.confirmed)
        .bind(answer.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_ranked_for_question(
        &self,
        question_id: Snowflake,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Ranked<Answer>>> {
        let rows = sqlx::query_as::<_, RankedAnswerModel>(
            r#"
            SELECT a.id, a.text, a.author_id, a.question_id, a.confirmed, a.created_at,
                   COALESCE(SUM(v.weight), 0) AS rank
            FROM answers a
            LEFT JOIN votes v ON v.target_kind = $1 AND v.target_id = a.id
            WHERE a.question_id = $2
            GROUP BY a.id
            ORDER BY a.confirmed DESC, rank DESC, a.created_at DESC, a.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(VoteTargetKind::Answer.as_i16())
        .bind(question_id.into_inner())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Ranked::<Answer>::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_for_question(&self, question_id: Snowflake) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM answers
            WHERE question_id = $1
            "#,
        )
        .bind(question_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count as u64)
    }
}
