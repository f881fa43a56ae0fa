//! User entity - the slice of a profile this engine references
//!
//! Registration, login, and avatar upload live in an external collaborator;
//! votes and authorship only need a resolved user row to point at.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User
    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            avatar: None,
            created_at: Utc::now(),
        }
    }
}
