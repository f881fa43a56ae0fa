//! Offset pagination with a hard out-of-range contract
//!
//! Pages are 1-based. A page past the last one is an error, never a silent
//! empty result; page 1 of an empty set is valid and empty.

use quorum_core::DomainError;

/// One page of a listing
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub has_more: bool,
}

/// Resolved window for a page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub offset: i64,
    pub total_pages: u32,
    pub has_more: bool,
}

/// Validate a page number against the total and compute its offset
pub(crate) fn page_window(
    total: u64,
    page: u32,
    page_size: u32,
) -> Result<PageWindow, DomainError> {
    let size = u64::from(page_size.max(1));
    let total_pages = total.div_ceil(size).max(1) as u32;
    if page == 0 || page > total_pages {
        return Err(DomainError::PageOutOfRange {
            page,
            pages: total_pages,
        });
    }
    Ok(PageWindow {
        offset: i64::from(page - 1) * size as i64,
        total_pages,
        has_more: page < total_pages,
    })
}
