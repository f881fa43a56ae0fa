//! Test fixtures and data generators
//!
//! All ids come from a time-based generator and all names carry an id
//! suffix, so fixtures never collide across test runs against a
//! persistent database.

use std::sync::OnceLock;

use quorum_core::entities::{Answer, Question, Tag, User};
use quorum_core::value_objects::{Snowflake, SnowflakeGenerator};
use quorum_service::ServiceContext;

/// Generate an id unique across test runs
pub fn test_id() -> Snowflake {
    static GENERATOR: OnceLock<SnowflakeGenerator> = OnceLock::new();
    GENERATOR
        .get_or_init(|| SnowflakeGenerator::new(99))
        .next_id()
}

/// Unique name with the given prefix
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}_{}", test_id().into_inner())
}

/// Create a user row to vote or author with
pub async fn seed_user(ctx: &ServiceContext) -> Snowflake {
    let user = User::new(test_id(), unique_name("user"));
    ctx.user_repo().create(&user).await.unwrap();
    user.id
}

/// Create a tag row with a unique name; returns the tag
pub async fn seed_tag(ctx: &ServiceContext) -> Tag {
    let tag = Tag::new(test_id(), unique_name("tag"));
    ctx.tag_repo().create(&tag).await.unwrap();
    tag
}

/// Create a question carrying the given tags
pub async fn seed_question(ctx: &ServiceContext, author: Snowflake, tags: &[Tag]) -> Snowflake {
    let mut question = Question::new(
        test_id(),
        unique_name("question"),
        "scenario body".to_string(),
        author,
    );
    question.tags = tags.to_vec();
    ctx.question_repo().create(&question).await.unwrap();
    question.id
}

/// Create an answer on a question
pub async fn seed_answer(
    ctx: &ServiceContext,
    author: Snowflake,
    question_id: Snowflake,
    confirmed: bool,
) -> Snowflake {
    let mut answer = Answer::new(test_id(), "scenario answer".to_string(), author, question_id);
    answer.confirmed = confirmed;
    ctx.answer_repo().create(&answer).await.unwrap();
    answer.id
}
