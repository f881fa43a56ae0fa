//! Test helpers for integration tests
//!
//! Tests run only when DATABASE_URL points at a PostgreSQL instance; the
//! schema is applied on first connect and each helper call returns a
//! fresh service context over the shared pool.

use std::path::Path;

use quorum_common::ListingConfig;
use quorum_db::PgPool;
use quorum_service::ServiceContext;

/// Connect to the test database and apply the schema
///
/// Returns None (so the caller can skip) when DATABASE_URL is unset or
/// unreachable.
pub async fn test_pool() -> Option<PgPool> {
    let _ = dotenvy::dotenv();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&database_url).await.ok()?;
    sqlx::migrate::Migrator::new(Path::new("../../crates/quorum-db/migrations"))
        .await
        .ok()?
        .run(&pool)
        .await
        .ok()?;
    Some(pool)
}

/// Engine context over the test database with the given page size
pub async fn test_context(page_size: u32) -> Option<ServiceContext> {
    let pool = test_pool().await?;
    let listing = ListingConfig {
        page_size,
        ..ListingConfig::default()
    };
    Some(ServiceContext::postgres(pool, listing, 0))
}
