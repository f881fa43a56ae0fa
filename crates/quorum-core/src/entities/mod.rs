//! Domain entities

mod answer;
mod question;
mod tag;
mod user;
mod vote;

pub use answer::Answer;
pub use question::Question;
pub use tag::Tag;
pub use user::User;
pub use vote::{Ranked, Vote, VoteDirection, VoteTarget, VoteTargetKind, VoteTransition};
