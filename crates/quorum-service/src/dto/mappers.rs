//! Entity → response DTO mappers

use quorum_core::entities::{Answer, Question, Ranked, Tag};

use crate::services::Page;

use super::responses::{
    AnswerResponse, PageResponse, PaginationMeta, QuestionResponse, TagResponse,
};

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.to_string(),
            name: tag.name.clone(),
        }
    }
}

impl From<&Ranked<Question>> for QuestionResponse {
    fn from(ranked: &Ranked<Question>) -> Self {
        Self {
            id: ranked.item.id.to_string(),
            label: ranked.item.label.clone(),
            text: ranked.item.text.clone(),
            author_id: ranked.item.author_id.map(|id| id.to_string()),
            created_at: ranked.item.created_at,
            tags: ranked.item.tags.iter().map(TagResponse::from).collect(),
            rank: ranked.rank,
        }
    }
}

impl From<&Ranked<Answer>> for AnswerResponse {
    fn from(ranked: &Ranked<Answer>) -> Self {
        Self {
            id: ranked.item.id.to_string(),
            text: ranked.item.text.clone(),
            author_id: ranked.item.author_id.map(|id| id.to_string()),
            question_id: ranked.item.question_id.to_string(),
            confirmed: ranked.item.confirmed,
            created_at: ranked.item.created_at,
            rank: ranked.rank,
        }
    }
}

impl<T> PageResponse<T> {
    /// Wrap a service page, mapping each item into its response form
    pub fn from_page<S>(page: &Page<S>, page_size: u32) -> Self
    where
        for<'a> T: From<&'a S>,
    {
        Self {
            data: page.items.iter().map(T::from).collect(),
            pagination: PaginationMeta {
                page: page.page,
                total_pages: page.total_pages,
                has_more: page.has_more,
                page_size,
            },
        }
    }
}
