//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
///
/// Every failure rejects exactly one request; there are no fatal
/// conditions in this layer.
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Authorization
    // =========================================================================
    #[error("No identity supplied for a mutating call")]
    Unauthorized,

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Question not found: {0}")]
    QuestionNotFound(Snowflake),

    #[error("Answer not found: {0}")]
    AnswerNotFound(Snowflake),

    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Unknown vote target kind: {0}")]
    UnknownTargetKind(String),

    #[error("Page {page} out of range: {pages} page(s) available")]
    PageOutOfRange { page: u32, pages: u32 },

    // =========================================================================
    // Invalid Arguments
    // =========================================================================
    #[error("Invalid vote direction: {0} (must be +1 or -1)")]
    InvalidDirection(i64),

    #[error("Too many tags: maximum {max}")]
    TooManyTags { max: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    // =========================================================================
    // Conflicts
    // =========================================================================
    #[error("Vote write contention not resolved after {attempts} attempts")]
    ConflictRetryExhausted { attempts: u32 },

    #[error("Tag already exists: {0}")]
    DuplicateTag(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",

            Self::QuestionNotFound(_) => "UNKNOWN_QUESTION",
            Self::AnswerNotFound(_) => "UNKNOWN_ANSWER",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::UnknownTargetKind(_) => "UNKNOWN_TARGET_KIND",
            Self::PageOutOfRange { .. } => "PAGE_OUT_OF_RANGE",

            Self::InvalidDirection(_) => "INVALID_DIRECTION",
            Self::TooManyTags { .. } => "TOO_MANY_TAGS",
            Self::Validation(_) => "VALIDATION_ERROR",

            Self::ConflictRetryExhausted { .. } => "CONFLICT_RETRY_EXHAUSTED",
            Self::DuplicateTag(_) => "DUPLICATE_TAG",

            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::QuestionNotFound(_)
                | Self::AnswerNotFound(_)
                | Self::UserNotFound(_)
                | Self::UnknownTargetKind(_)
                | Self::PageOutOfRange { .. }
        )
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidDirection(_) | Self::TooManyTags { .. } | Self::Validation(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ConflictRetryExhausted { .. } | Self::DuplicateTag(_)
        )
    }
}
