//! Question entity <-> model mappers

use quorum_core::entities::{Question, Ranked};
use quorum_core::value_objects::Snowflake;

use crate::models::{QuestionModel, RankedQuestionModel};

/// Convert QuestionModel to Question entity (tags stitched on separately)
impl From<QuestionModel> for Question {
    fn from(model: QuestionModel) -> Self {
        Question {
            id: Snowflake::new(model.id),
            label: model.label,
            text: model.text,
            author_id: model.author_id.map(Snowflake::new),
            created_at: model.created_at,
            tags: Vec::new(),
        }
    }
}

/// Convert a ranked listing row to a Ranked<Question>
impl From<RankedQuestionModel> for Ranked<Question> {
    fn from(model: RankedQuestionModel) -> Self {
        Ranked::new(
            Question {
                id: Snowflake::new(model.id),
                label: model.label,
                text: model.text,
                author_id: model.author_id.map(Snowflake::new),
                created_at: model.created_at,
                tags: Vec::new(),
            },
            model.rank,
        )
    }
}
