//! Database models - row structs with SQLx `FromRow` derives

mod answer;
mod question;
mod tag;
mod user;
mod vote;

pub use answer::{AnswerModel, RankedAnswerModel};
pub use question::{QuestionModel, QuestionTagRow, RankedQuestionModel};
pub use tag::TagModel;
pub use user::UserModel;
pub use vote::VoteModel;
