//! PostgreSQL implementation of TagRepository
//!
//! Tag names carry a unique constraint; a lost creation race surfaces as
//! DuplicateTag so the caller can re-fetch the winning row.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use quorum_core::entities::Tag;
use quorum_core::error::DomainError;
use quorum_core::traits::{RepoResult, TagRepository};

use crate::models::TagModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TagRepository
#[derive(Clone)]
pub struct PgTagRepository {
    pool: PgPool,
}

impl PgTagRepository {
    /// Create a new PgTagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Tag>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let results = sqlx::query_as::<_, TagModel>(
            r#"
            SELECT id, name
            FROM tags
            WHERE name = ANY($1)
            "#,
        )
        .bind(names.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Tag>> {
        let result = sqlx::query_as::<_, TagModel>(
            r#"
            SELECT id, name
            FROM tags
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Tag::from))
    }

    #[instrument(skip(self, tag))]
    async fn create(&self, tag: &Tag) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tags (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(tag.id.into_inner())
        .bind(&tag.name)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateTag(tag.name.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn names(&self) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT name FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
