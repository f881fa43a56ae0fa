//! Response DTOs
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Paginated response with offset-based pagination
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// 1-based page number
    pub page: u32,
    /// Total number of pages (at least 1)
    pub total_pages: u32,
    /// Whether more pages exist after this one
    pub has_more: bool,
    /// Page size used
    pub page_size: u32,
}

/// Tag on a question
#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
}

/// Question with its aggregated rank
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub label: String,
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
    pub rank: i64,
}

/// Answer with its aggregated rank
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub id: String,
    pub text: String,
    pub author_id: Option<String>,
    pub question_id: String,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub rank: i64,
}
