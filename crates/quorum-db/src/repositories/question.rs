//! PostgreSQL implementation of QuestionRepository
//!
//! Listing queries aggregate vote weights with a LEFT JOIN + GROUP BY, so
//! every rank in a window comes from one aggregation pass. Filters use
//! EXISTS / LIKE predicates on the questions table itself and can never
//! multiply the joined vote rows.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quorum_core::entities::{Question, Ranked, Tag, VoteTargetKind};
use quorum_core::traits::{OrderKey, QuestionFilter, QuestionQuery, QuestionRepository, RepoResult};
use quorum_core::value_objects::Snowflake;

use crate::models::{QuestionModel, QuestionTagRow, RankedQuestionModel};

use super::error::{escape_like, map_db_error};

/// ORDER BY fragment per ordering mode; both keys always apply, the modes
/// only swap which one leads. Descending id keeps ties deterministic.
fn order_sql(order: OrderKey) -> &'static str {
    match order {
        OrderKey::RankThenRecency => "rank DESC, q.created_at DESC, q.id DESC",
        OrderKey::RecencyThenRank => "q.created_at DESC, rank DESC, q.id DESC",
    }
}

/// PostgreSQL implementation of QuestionRepository
#[derive(Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
    case_insensitive_search: bool,
}

impl PgQuestionRepository {
    /// Create a new PgQuestionRepository with case-sensitive text search
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            case_insensitive_search: false,
        }
    }

    /// Choose whether text search matches case-insensitively
    #[must_use]
    pub fn with_case_insensitive_search(mut self, enabled: bool) -> Self {
        self.case_insensitive_search = enabled;
        self
    }

    fn like_op(&self) -> &'static str {
        if self.case_insensitive_search {
            "ILIKE"
        } else {
            "LIKE"
        }
    }

    /// Fetch the (question, tag) link rows for a set of question ids
    async fn tag_rows(&self, ids: &[i64]) -> RepoResult<Vec<QuestionTagRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, QuestionTagRow>(
            r#"
            SELECT qt.question_id, t.id AS tag_id, t.name AS tag_name
            FROM question_tags qt
            JOIN tags t ON t.id = qt.tag_id
            WHERE qt.question_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    /// Populate `tags` on a window of ranked questions with one query
    async fn attach_tags(&self, questions: &mut [Ranked<Question>]) -> RepoResult<()> {
        let ids: Vec<i64> = questions.iter().map(|r| r.item.id.into_inner()).collect();
        let mut by_question: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in self.tag_rows(&ids).await? {
            by_question
                .entry(row.question_id)
                .or_default()
                .push(Tag::new(Snowflake::new(row.tag_id), row.tag_name));
        }
        for ranked in questions.iter_mut() {
            if let Some(tags) = by_question.remove(&ranked.item.id.into_inner()) {
                ranked.item.tags = tags;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>> {
        let result = sqlx::query_as::<_, QuestionModel>(
            r#"
            SELECT id, label, text, author_id, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            return Ok(None);
        };
        let mut question = Question::from(model);
        question.tags = self
            .tag_rows(&[question.id.into_inner()])
            .await?
            .into_iter()
            .map(|row| Tag::new(Snowflake::new(row.tag_id), row.tag_name))
            .collect();
        Ok(Some(question))
    }

    #[instrument(skip(self))]
    async fn find_ranked(&self, id: Snowflake) -> RepoResult<Option<Ranked<Question>>> {
        let result = sqlx::query_as::<_, RankedQuestionModel>(
            r#"
            SELECT q.id, q.label, q.text, q.author_id, q.created_at,
                   COALESCE(SUM(v.weight), 0) AS rank
            FROM questions q
            LEFT JOIN votes v ON v.target_kind = $1 AND v.target_id = q.id
            WHERE q.id = $2
            GROUP BY q.id
            "#,
        )
        .bind(VoteTargetKind::Question.as_i16())
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            return Ok(None);
        };
        let mut ranked = [Ranked::<Question>::from(model)];
        self.attach_tags(&mut ranked).await?;
        let [ranked] = ranked;
        Ok(Some(ranked))
    }

    #[instrument(skip(self, question))]
    async fn create(&self, question: &Question) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO questions (id, label, text, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(question.id.into_inner())
        .bind(&question.label)
        .bind(&question.text)
        .bind(question.author_id.map(Snowflake::into_inner))
        .bind(question.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for tag in &question.tags {
            sqlx::query(
                r#"
                INSERT INTO question_tags (question_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(question.id.into_inner())
            .bind(tag.id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn list_ranked(&self, query: &QuestionQuery) -> RepoResult<Vec<Ranked<Question>>> {
        let order = order_sql(query.order);
        let rows = match &query.filter {
            QuestionFilter::All => {
                let sql = format!(
                    r#"
                    SELECT q.id, q.label, q.text, q.author_id, q.created_at,
                           COALESCE(SUM(v.weight), 0) AS rank
                    FROM questions q
                    LEFT JOIN votes v ON v.target_kind = $1 AND v.target_id = q.id
                    GROUP BY q.id
                    ORDER BY {order}
                    LIMIT $2 OFFSET $3
                    "#
                );
                sqlx::query_as::<_, RankedQuestionModel>(&sql)
                    .bind(VoteTargetKind::Question.as_i16())
                    .bind(query.limit)
                    .bind(query.offset)
                    .fetch_all(&self.pool)
                    .await
            }
            QuestionFilter::Tag(name) => {
                let sql = format!(
                    r#"
                    SELECT q.id, q.label, q.text, q.author_id, q.created_at,
                           COALESCE(SUM(v.weight), 0) AS rank
                    FROM questions q
                    LEFT JOIN votes v ON v.target_kind = $1 AND v.target_id = q.id
                    WHERE EXISTS (
                        SELECT 1 FROM question_tags qt
                        JOIN tags t ON t.id = qt.tag_id
                        WHERE qt.question_id = q.id AND t.name = $2
                    )
                    GROUP BY q.id
                    ORDER BY {order}
                    LIMIT $3 OFFSET $4
                    "#
                );
                sqlx::query_as::<_, RankedQuestionModel>(&sql)
                    .bind(VoteTargetKind::Question.as_i16())
                    .bind(name)
                    .bind(query.limit)
                    .bind(query.offset)
                    .fetch_all(&self.pool)
                    .await
            }
            QuestionFilter::Text(needle) => {
                let op = self.like_op();
                let sql = format!(
                    r#"
                    SELECT q.id, q.label, q.text, q.author_id, q.created_at,
                           COALESCE(SUM(v.weight), 0) AS rank
                    FROM questions q
                    LEFT JOIN votes v ON v.target_kind = $1 AND v.target_id = q.id
                    WHERE (q.label {op} $2 OR q.text {op} $2)
                    GROUP BY q.id
                    ORDER BY {order}
                    LIMIT $3 OFFSET $4
                    "#
                );
                sqlx::query_as::<_, RankedQuestionModel>(&sql)
                    .bind(VoteTargetKind::Question.as_i16())
                    .bind(format!("%{}%", escape_like(needle)))
                    .bind(query.limit)
                    .bind(query.offset)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        let mut ranked: Vec<Ranked<Question>> =
            rows.into_iter().map(Ranked::<Question>::from).collect();
        self.attach_tags(&mut ranked).await?;
        Ok(ranked)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &QuestionFilter) -> RepoResult<u64> {
        let count = match filter {
            QuestionFilter::All => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
                    .fetch_one(&self.pool)
                    .await
            }
            QuestionFilter::Tag(name) => {
                sqlx::query_scalar::<_, i64>(
                    r#"
                    SELECT COUNT(*) FROM questions q
                    WHERE EXISTS (
                        SELECT 1 FROM question_tags qt
                        JOIN tags t ON t.id = qt.tag_id
                        WHERE qt.question_id = q.id AND t.name = $1
                    )
                    "#,
                )
                .bind(name)
                .fetch_one(&self.pool)
                .await
            }
            QuestionFilter::Text(needle) => {
                let op = self.like_op();
                let sql = format!(
                    "SELECT COUNT(*) FROM questions q WHERE (q.label {op} $1 OR q.text {op} $1)"
                );
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(format!("%{}%", escape_like(needle)))
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(map_db_error)?;

        Ok(count as u64)
    }

    #[instrument(skip(self))]
    async fn top_ranked(&self, limit: i64) -> RepoResult<Vec<Ranked<Question>>> {
        let rows = sqlx::query_as::<_, RankedQuestionModel>(
            r#"
            SELECT q.id, q.label, q.text, q.author_id, q.created_at,
                   COALESCE(SUM(v.weight), 0) AS rank
            FROM questions q
            LEFT JOIN votes v ON v.target_kind = $1 AND v.target_id = q.id
            GROUP BY q.id
            ORDER BY rank DESC, q.created_at DESC, q.id DESC
            LIMIT $2
            "#,
        )
        .bind(VoteTargetKind::Question.as_i16())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut ranked: Vec<Ranked<Question>> =
            rows.into_iter().map(Ranked::<Question>::from).collect();
        self.attach_tags(&mut ranked).await?;
        Ok(ranked)
    }
}
