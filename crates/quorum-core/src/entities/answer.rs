//! Answer entity - a votable answer owned by its question

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Answer entity
///
/// `confirmed` marks the accepted answer. It is written by an external
/// collaborator; this engine only reads it for ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub id: Snowflake,
    pub text: String,
    pub author_id: Option<Snowflake>,
    pub question_id: Snowflake,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Create a new Answer
    pub fn new(id: Snowflake, text: String, author_id: Snowflake, question_id: Snowflake) -> Self {
        Self {
            id,
            text,
            author_id: Some(author_id),
            question_id,
            confirmed: false,
            created_at: Utc::now(),
        }
    }

    /// Check whether this answer belongs to the given question
    #[inline]
    pub fn belongs_to(&self, question_id: Snowflake) -> bool {
        self.question_id == question_id
    }
}
