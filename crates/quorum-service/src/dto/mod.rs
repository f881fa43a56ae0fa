//! Request/response DTOs for the engine's callers

mod mappers;
mod requests;
mod responses;

pub use requests::{AskQuestionRequest, PostAnswerRequest, SearchParams, VoteRequest};
pub use responses::{
    AnswerResponse, PageResponse, PaginationMeta, QuestionResponse, TagResponse,
};
