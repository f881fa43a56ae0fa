//! Service context - dependency container for services
//!
//! Holds the repositories, listing configuration, and id generator the
//! services need. Built per process, shared across requests; listing and
//! ordering specifications themselves are constructed per call.

use std::sync::Arc;

use quorum_common::ListingConfig;
use quorum_core::traits::{
    AnswerRepository, QuestionRepository, TagRepository, UserRepository, VoteRepository,
};
use quorum_core::{Snowflake, SnowflakeGenerator};
use quorum_db::{
    PgAnswerRepository, PgPool, PgQuestionRepository, PgTagRepository, PgUserRepository,
    PgVoteRepository,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    question_repo: Arc<dyn QuestionRepository>,
    answer_repo: Arc<dyn AnswerRepository>,
    tag_repo: Arc<dyn TagRepository>,
    user_repo: Arc<dyn UserRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    listing: ListingConfig,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Wire a context onto PostgreSQL repositories
    pub fn postgres(pool: PgPool, listing: ListingConfig, worker_id: u16) -> Self {
        let question_repo = PgQuestionRepository::new(pool.clone())
            .with_case_insensitive_search(listing.case_insensitive_search);
        Self {
            question_repo: Arc::new(question_repo),
            answer_repo: Arc::new(PgAnswerRepository::new(pool.clone())),
            tag_repo: Arc::new(PgTagRepository::new(pool.clone())),
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            vote_repo: Arc::new(PgVoteRepository::new(pool)),
            listing,
            snowflake_generator: Arc::new(SnowflakeGenerator::new(worker_id)),
        }
    }

    /// Start building a context from individual parts
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::default()
    }

    pub fn question_repo(&self) -> &dyn QuestionRepository {
        self.question_repo.as_ref()
    }

    pub fn answer_repo(&self) -> &dyn AnswerRepository {
        self.answer_repo.as_ref()
    }

    pub fn tag_repo(&self) -> &dyn TagRepository {
        self.tag_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    pub fn listing(&self) -> &ListingConfig {
        &self.listing
    }

    /// Produce a fresh id
    pub fn next_id(&self) -> Snowflake {
        self.snowflake_generator.next_id()
    }
}

/// Builder for [`ServiceContext`], mainly for tests and custom wiring
#[derive(Default)]
pub struct ServiceContextBuilder {
    question_repo: Option<Arc<dyn QuestionRepository>>,
    answer_repo: Option<Arc<dyn AnswerRepository>>,
    tag_repo: Option<Arc<dyn TagRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    listing: Option<ListingConfig>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    #[must_use]
    pub fn question_repo(mut self, repo: Arc<dyn QuestionRepository>) -> Self {
        self.question_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn answer_repo(mut self, repo: Arc<dyn AnswerRepository>) -> Self {
        self.answer_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn tag_repo(mut self, repo: Arc<dyn TagRepository>) -> Self {
        self.tag_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn listing(mut self, listing: ListingConfig) -> Self {
        self.listing = Some(listing);
        self
    }

    #[must_use]
    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Finish the build
    ///
    /// # Panics
    /// Panics if any repository is missing; wiring happens once at startup
    /// and a partial context is a programming error.
    #[must_use]
    pub fn build(self) -> ServiceContext {
        ServiceContext {
            question_repo: self.question_repo.expect("question repository not set"),
            answer_repo: self.answer_repo.expect("answer repository not set"),
            tag_repo: self.tag_repo.expect("tag repository not set"),
            user_repo: self.user_repo.expect("user repository not set"),
            vote_repo: self.vote_repo.expect("vote repository not set"),
            listing: self.listing.unwrap_or_default(),
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
        }
    }
}
