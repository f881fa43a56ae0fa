//! Answer service - per-question ranked listings and posting
//!
//! The accepted answer always sorts first; this engine reads the
//! confirmed flag but never sets it.

use tracing::{info, instrument};
use validator::Validate;

use quorum_core::entities::{Answer, Ranked};
use quorum_core::value_objects::Snowflake;
use quorum_core::DomainError;

use crate::dto::PostAnswerRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::paging::{page_window, Page};

/// Answer service
pub struct AnswerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnswerService<'a> {
    /// Create a new AnswerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of a question's answers: confirmed first, then rank,
    /// then recency, all descending
    #[instrument(skip(self))]
    pub async fn list_for_question(
        &self,
        question_id: Snowflake,
        page: u32,
    ) -> ServiceResult<Page<Ranked<Answer>>> {
        self.ctx
            .question_repo()
            .find_by_id(question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(question_id))?;

        let page_size = self.ctx.listing().page_size;
        let total = self.ctx.answer_repo().count_for_question(question_id).await?;
        let window = page_window(total, page, page_size)?;

        let items = self
            .ctx
            .answer_repo()
            .list_ranked_for_question(question_id, i64::from(page_size), window.offset)
            .await?;

        Ok(Page {
            items,
            page,
            total_pages: window.total_pages,
            has_more: window.has_more,
        })
    }

    /// Post an answer to a question and return the new answer's id
    #[instrument(skip(self, request))]
    pub async fn post(
        &self,
        author: Option<Snowflake>,
        question_id: Snowflake,
        request: PostAnswerRequest,
    ) -> ServiceResult<Snowflake> {
        let author_id = author.ok_or(DomainError::Unauthorized)?;
        request.validate()?;

        self.ctx
            .question_repo()
            .find_by_id(question_id)
            .await?
            .ok_or(DomainError::QuestionNotFound(question_id))?;

        let answer = Answer::new(self.ctx.next_id(), request.text, author_id, question_id);
        self.ctx.answer_repo().create(&answer).await?;

        info!(answer_id = %answer.id, question_id = %question_id, "Answer posted");
        Ok(answer.id)
    }
}
