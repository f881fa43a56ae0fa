//! PostgreSQL implementation of VoteRepository (the Vote Store)
//!
//! The one-row-per-(voter, target) invariant is backed by the unique index
//! on (voter_id, target_kind, target_id). `insert` and `update_weight` are
//! single statements, atomic per key: the reconciler composes them into a
//! race-free upsert without cross-call locks.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quorum_core::entities::{Vote, VoteTarget};
use quorum_core::traits::{RepoResult, VoteRepository};
use quorum_core::value_objects::Snowflake;

use crate::models::VoteModel;

use super::error::map_db_error;

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn find(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<Option<Vote>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT id, voter_id, target_kind, target_id, weight
            FROM votes
            WHERE voter_id = $1 AND target_kind = $2 AND target_id = $3
            "#,
        )
        .bind(voter_id.into_inner())
        .bind(target.kind().as_i16())
        .bind(target.id().into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Vote::try_from).transpose()
    }

    #[instrument(skip(self, vote))]
    async fn insert(&self, vote: &Vote) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO votes (id, voter_id, target_kind, target_id, weight)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (voter_id, target_kind, target_id) DO NOTHING
            "#,
        )
        .bind(vote.id.into_inner())
        .bind(vote.voter_id.into_inner())
        .bind(vote.target.kind().as_i16())
        .bind(vote.target.id().into_inner())
        .bind(vote.weight)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn update_weight(
        &self,
        voter_id: Snowflake,
        target: VoteTarget,
        expected: i32,
        new: i32,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE votes
            SET weight = $4
            WHERE voter_id = $1 AND target_kind = $2 AND target_id = $3 AND weight = $5
            "#,
        )
        .bind(voter_id.into_inner())
        .bind(target.kind().as_i16())
        .bind(target.id().into_inner())
        .bind(new)
        .bind(expected)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn rank_of(&self, target: VoteTarget) -> RepoResult<i64> {
        let rank = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(weight), 0)
            FROM votes
            WHERE target_kind = $1 AND target_id = $2
            "#,
        )
        .bind(target.kind().as_i16())
        .bind(target.id().into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rank)
    }

    #[instrument(skip(self))]
    async fn count_for(&self, target: VoteTarget) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM votes
            WHERE target_kind = $1 AND target_id = $2
            "#,
        )
        .bind(target.kind().as_i16())
        .bind(target.id().into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count as u64)
    }
}
