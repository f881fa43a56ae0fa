//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The vote store port splits the
//! find-then-upsert sequence into a conflict-silent insert and a guarded
//! compare-and-set so the reconciler can close the check-then-act race
//! without holding locks across calls.

use async_trait::async_trait;

use crate::entities::{Answer, Question, Ranked, Tag, User, Vote, VoteTarget};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Listing queries
// ============================================================================

/// Which key leads the listing order
///
/// Both keys always apply, descending; the variants only swap which one is
/// primary. A descending id tie-break keeps pagination deterministic when
/// both keys collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderKey {
    #[default]
    RankThenRecency,
    RecencyThenRank,
}

/// Filter predicate for question listings
///
/// At most one predicate is active per query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuestionFilter {
    /// No filtering
    #[default]
    All,
    /// Exact tag-name equality
    Tag(String),
    /// Unanchored substring over label OR text
    Text(String),
}

/// Offset/limit window over an ordered, filtered question set
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    pub order: OrderKey,
    pub filter: QuestionFilter,
    pub limit: i64,
    pub offset: i64,
}

// ============================================================================
// Question Repository
// ============================================================================

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find question by ID (tags populated)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Question>>;

    /// Find question by ID with its live rank attached
    async fn find_ranked(&self, id: Snowflake) -> RepoResult<Option<Ranked<Question>>>;

    /// Create a new question and link its (already existing) tags
    async fn create(&self, question: &Question) -> RepoResult<()>;

    /// One window of the ranked, filtered, ordered question listing
    ///
    /// Ranks for the whole window are aggregated in a single pass.
    async fn list_ranked(&self, query: &QuestionQuery) -> RepoResult<Vec<Ranked<Question>>>;

    /// Total question count under the same filter the listing uses
    async fn count(&self, filter: &QuestionFilter) -> RepoResult<u64>;

    /// The `limit` highest-ranked questions (rank, then recency)
    async fn top_ranked(&self, limit: i64) -> RepoResult<Vec<Ranked<Question>>>;
}

// ============================================================================
// Answer Repository
// ============================================================================

#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Find answer by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Answer>>;

    /// Create a new answer
    async fn create(&self, answer: &Answer) -> RepoResult<()>;

    /// One window of a question's answers: confirmed first, then rank,
    /// then recency, all descending
    async fn list_ranked_for_question(
        &self,
        question_id: Snowflake,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Ranked<Answer>>>;

    /// Number of answers on a question
    async fn count_for_question(&self, question_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Tag Repository
// ============================================================================

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Find tags matching any of the given names
    async fn find_by_names(&self, names: &[String]) -> RepoResult<Vec<Tag>>;

    /// Find one tag by exact name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Tag>>;

    /// Create a new tag; a concurrent same-name insert surfaces as
    /// [`DomainError::DuplicateTag`]
    async fn create(&self, tag: &Tag) -> RepoResult<()>;

    /// All tag names (for the ask-question form)
    async fn names(&self) -> RepoResult<Vec<String>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Vote Repository (the Vote Store)
// ============================================================================
//
// At most one row exists per (voter, target); a unique index is the hard
// backstop. No delete operation is exposed: weights move, rows stay.

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Find the voter's vote on a target, if any
    async fn find(&self, voter_id: Snowflake, target: VoteTarget) -> RepoResult<Option<Vote>>;

    /// Insert a first vote; returns false when a row for the
    /// (voter, target) key already exists (lost race, no error)
    async fn insert(&self, vote: &Vote) -> RepoResult<bool>;

    /// Compare-and-set the weight; returns false when the stored weight
    /// no longer equals `expected` (lost race, no error)
    async fn update_weight(
        &self,
        voter_id: Snowflake,
        target: VoteTarget,
        expected: i32,
        new: i32,
    ) -> RepoResult<bool>;

    /// Sum of weights referencing the target; 0 when no votes exist
    async fn rank_of(&self, target: VoteTarget) -> RepoResult<i64>;

    /// Number of vote rows referencing the target
    async fn count_for(&self, target: VoteTarget) -> RepoResult<u64>;
}
