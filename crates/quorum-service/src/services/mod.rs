//! Business logic services
//!
//! This module contains the service layer implementations: vote
//! reconciliation, ranked question/answer listings, and tag resolution.

pub mod answer;
pub mod context;
pub mod error;
pub mod paging;
pub mod question;
pub mod tag;
pub mod vote;

// Re-export all services for convenience
pub use answer::AnswerService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use paging::Page;
pub use question::QuestionService;
pub use tag::TagService;
pub use vote::VoteService;
