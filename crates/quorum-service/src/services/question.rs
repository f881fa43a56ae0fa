//! Question service - ranked listings, search façade, detail, ask
//!
//! Every listing builds its ordering and filter specification per call
//! from explicit parameters; nothing query-shaped is shared across
//! requests.

use tracing::{info, instrument};
use validator::Validate;

use quorum_core::entities::{Question, Ranked};
use quorum_core::traits::{OrderKey, QuestionFilter, QuestionQuery};
use quorum_core::value_objects::Snowflake;
use quorum_core::DomainError;

use crate::dto::{AskQuestionRequest, SearchParams};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::paging::{page_window, Page};
use super::tag::TagService;

/// Question service
pub struct QuestionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QuestionService<'a> {
    /// Create a new QuestionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of the ranked question listing
    ///
    /// Both sort keys always apply; `order` picks which leads. A page past
    /// the last available one is rejected, not returned empty.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        order: OrderKey,
        filter: QuestionFilter,
        page: u32,
    ) -> ServiceResult<Page<Ranked<Question>>> {
        let page_size = self.ctx.listing().page_size;
        let total = self.ctx.question_repo().count(&filter).await?;
        let window = page_window(total, page, page_size)?;

        let query = QuestionQuery {
            order,
            filter,
            limit: i64::from(page_size),
            offset: window.offset,
        };
        let items = self.ctx.question_repo().list_ranked(&query).await?;

        Ok(Page {
            items,
            page,
            total_pages: window.total_pages,
            has_more: window.has_more,
        })
    }

    /// Search façade: tag equality wins over text search when both are
    /// supplied; neither means no filter. Results are rank-ordered.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        params: SearchParams,
        page: u32,
    ) -> ServiceResult<Page<Ranked<Question>>> {
        self.list(OrderKey::RankThenRecency, params.into_filter(), page)
            .await
    }

    /// The side-panel listing: highest rank first, recency breaking ties
    #[instrument(skip(self))]
    pub async fn top(&self) -> ServiceResult<Vec<Ranked<Question>>> {
        let limit = i64::from(self.ctx.listing().top_limit);
        Ok(self.ctx.question_repo().top_ranked(limit).await?)
    }

    /// Detail view: the question with its live rank
    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake) -> ServiceResult<Ranked<Question>> {
        Ok(self
            .ctx
            .question_repo()
            .find_ranked(id)
            .await?
            .ok_or(DomainError::QuestionNotFound(id))?)
    }

    /// Ask a new question, resolving up to three comma-separated tags
    #[instrument(skip(self, request))]
    pub async fn ask(
        &self,
        author: Option<Snowflake>,
        request: AskQuestionRequest,
    ) -> ServiceResult<Snowflake> {
        let author_id = author.ok_or(DomainError::Unauthorized)?;
        request.validate()?;

        let tags = match request.tags.as_deref() {
            Some(raw) => TagService::new(self.ctx).resolve(raw).await?,
            None => Vec::new(),
        };

        let mut question = Question::new(self.ctx.next_id(), request.label, request.text, author_id);
        question.tags = tags;
        self.ctx.question_repo().create(&question).await?;

        info!(question_id = %question.id, author_id = %author_id, "Question created");
        Ok(question.id)
    }
}
