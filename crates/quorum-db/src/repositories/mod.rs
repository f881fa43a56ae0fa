//! PostgreSQL repository implementations

mod answer;
mod error;
mod question;
mod tag;
mod user;
mod vote;

pub use answer::PgAnswerRepository;
pub use question::PgQuestionRepository;
pub use tag::PgTagRepository;
pub use user::PgUserRepository;
pub use vote::PgVoteRepository;
