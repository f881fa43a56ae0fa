//! Request DTOs
//!
//! All request DTOs implement `Deserialize`; mutating ones also implement
//! `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

use quorum_core::traits::QuestionFilter;

/// Ask a new question
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AskQuestionRequest {
    #[validate(length(min = 1, max = 200, message = "Question title must be 1-200 characters"))]
    pub label: String,

    #[validate(length(max = 10000, message = "Question body must be at most 10000 characters"))]
    pub text: String,

    /// Comma-separated tag names, at most 3 (e.g. "tag1, tag2, tag3")
    pub tags: Option<String>,
}

/// Post an answer to a question
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostAnswerRequest {
    #[validate(length(min = 1, max = 10000, message = "Answer text must be 1-10000 characters"))]
    pub text: String,
}

/// Directional vote on a question or answer
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    /// Exactly +1 or -1; anything else is rejected
    pub direction: i64,
}

/// Search parameters as callers supply them
///
/// When both are present, the tag parameter wins and the text parameter
/// is ignored; callers depend on this precedence.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchParams {
    pub search_tag: Option<String>,
    pub search_str: Option<String>,
}

impl SearchParams {
    /// Collapse the parameters into the single active filter predicate
    pub fn into_filter(self) -> QuestionFilter {
        match (self.search_tag, self.search_str) {
            (Some(tag), _) => QuestionFilter::Tag(tag),
            (None, Some(text)) => QuestionFilter::Text(text),
            (None, None) => QuestionFilter::All,
        }
    }
}
