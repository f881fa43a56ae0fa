//! Question entity - a votable forum question

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

use super::tag::Tag;

/// Question entity
///
/// The label may be empty at the storage layer; display code decides what
/// to render. The author is nullable: deleting an account keeps the
/// question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: Snowflake,
    pub label: String,
    pub text: String,
    pub author_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Question {
    /// Create a new Question
    pub fn new(id: Snowflake, label: String, text: String, author_id: Snowflake) -> Self {
        Self {
            id,
            label,
            text,
            author_id: Some(author_id),
            created_at: Utc::now(),
            tags: Vec::new(),
        }
    }

    /// Check whether the question carries a tag with the given name
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Tag names for display
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    /// Check whether the author account still exists
    #[inline]
    pub fn is_orphaned(&self) -> bool {
        self.author_id.is_none()
    }
}
