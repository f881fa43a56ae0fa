//! Tag service - resolves free-text tag names to rows
//!
//! Callers type up to three comma-separated names; existing rows are
//! reused, missing ones created. A lost same-name creation race is
//! resolved by re-fetching the row that won.

use tracing::{info, instrument};

use quorum_core::entities::Tag;
use quorum_core::DomainError;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Maximum tags per question
const MAX_TAGS: usize = 3;

/// Tag service
pub struct TagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TagService<'a> {
    /// Create a new TagService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a comma-separated tag list to rows, creating missing ones
    #[instrument(skip(self))]
    pub async fn resolve(&self, raw: &str) -> ServiceResult<Vec<Tag>> {
        let names: Vec<String> = if raw.trim().is_empty() {
            Vec::new()
        } else {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };
        if names.len() > MAX_TAGS {
            return Err(DomainError::TooManyTags { max: MAX_TAGS }.into());
        }

        let mut tags = self.ctx.tag_repo().find_by_names(&names).await?;
        for name in &names {
            if tags.iter().any(|t| &t.name == name) {
                continue;
            }
            let tag = Tag::new(self.ctx.next_id(), name.clone());
            match self.ctx.tag_repo().create(&tag).await {
                Ok(()) => {
                    info!(tag = %tag.name, "Tag created");
                    tags.push(tag);
                }
                // someone else created the same name concurrently; use theirs
                Err(DomainError::DuplicateTag(_)) => {
                    let existing = self
                        .ctx
                        .tag_repo()
                        .find_by_name(name)
                        .await?
                        .ok_or_else(|| DomainError::DuplicateTag(name.clone()))?;
                    tags.push(existing);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(tags)
    }

    /// All known tag names, for the ask-question form
    #[instrument(skip(self))]
    pub async fn names(&self) -> ServiceResult<Vec<String>> {
        Ok(self.ctx.tag_repo().names().await?)
    }
}
