//! # quorum-service
//!
//! Application layer for the rating & ranking engine: the vote reconciler,
//! ranked listing orchestration, the tag/text search façade, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use services::{
    AnswerService, Page, QuestionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TagService, VoteService,
};
