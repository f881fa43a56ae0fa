//! Vote database model

use sqlx::FromRow;

/// Database model for the votes table
///
/// `target_kind` is the stored discriminator (1 = question, 2 = answer),
/// constrained by a CHECK in the schema.
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub id: i64,
    pub voter_id: i64,
    pub target_kind: i16,
    pub target_id: i64,
    pub weight: i32,
}
