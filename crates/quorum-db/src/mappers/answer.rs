//! Answer entity <-> model mappers

use quorum_core::entities::{Answer, Ranked};
use quorum_core::value_objects::Snowflake;

use crate::models::{AnswerModel, RankedAnswerModel};

/// Convert AnswerModel to Answer entity
impl From<AnswerModel> for Answer {
    fn from(model: AnswerModel) -> Self {
        Answer {
            id: Snowflake::new(model.id),
            text: model.text,
            author_id: model.author_id.map(Snowflake::new),
            question_id: Snowflake::new(model.question_id),
            confirmed: model.confirmed,
            created_at: model.created_at,
        }
    }
}

/// Convert a ranked listing row to a Ranked<Answer>
impl From<RankedAnswerModel> for Ranked<Answer> {
    fn from(model: RankedAnswerModel) -> Self {
        Ranked::new(
            Answer {
                id: Snowflake::new(model.id),
                text: model.text,
                author_id: model.author_id.map(Snowflake::new),
                question_id: Snowflake::new(model.question_id),
                confirmed: model.confirmed,
                created_at: model.created_at,
            },
            model.rank,
        )
    }
}
