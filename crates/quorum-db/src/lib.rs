//! # quorum-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `quorum-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the ranked listing queries that
//!   aggregate vote weights in a single pass
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quorum_db::pool::{create_pool, DatabaseConfig};
//! use quorum_db::repositories::PgVoteRepository;
//! use quorum_core::traits::VoteRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let vote_repo = PgVoteRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAnswerRepository, PgQuestionRepository, PgTagRepository, PgUserRepository, PgVoteRepository,
};
