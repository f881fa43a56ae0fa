//! Answer database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the answers table
#[derive(Debug, Clone, FromRow)]
pub struct AnswerModel {
    pub id: i64,
    pub text: String,
    pub author_id: Option<i64>,
    pub question_id: i64,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
}

/// Answer row with its aggregated rank (from listing queries)
#[derive(Debug, Clone, FromRow)]
pub struct RankedAnswerModel {
    pub id: i64,
    pub text: String,
    pub author_id: Option<i64>,
    pub question_id: i64,
    pub confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub rank: i64,
}
