//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AnswerRepository, OrderKey, QuestionFilter, QuestionQuery, QuestionRepository, RepoResult,
    TagRepository, UserRepository, VoteRepository,
};
