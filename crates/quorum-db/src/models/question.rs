//! Question database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the questions table
#[derive(Debug, Clone, FromRow)]
pub struct QuestionModel {
    pub id: i64,
    pub label: String,
    pub text: String,
    pub author_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Question row with its aggregated rank (from listing queries)
#[derive(Debug, Clone, FromRow)]
pub struct RankedQuestionModel {
    pub id: i64,
    pub label: String,
    pub text: String,
    pub author_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub rank: i64,
}

/// One (question, tag) link row, used to stitch tags onto a page of questions
#[derive(Debug, Clone, FromRow)]
pub struct QuestionTagRow {
    pub question_id: i64,
    pub tag_id: i64,
    pub tag_name: String,
}
