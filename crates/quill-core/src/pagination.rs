//! Page slicing over an already filtered and ordered sequence.

use quill_shared::PageResponse;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Resolved 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Missing or zero values fall back to page 1 and `default_size`.
    pub fn resolve(page: Option<u64>, size: Option<u64>, default_size: u64) -> Self {
        let default_size = default_size.max(1);
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            size: size.filter(|s| *s > 0).unwrap_or(default_size),
        }
    }

    /// Wrap one already-cut page of a `total_count` long sequence.
    pub fn respond<T>(self, items: Vec<T>, total_count: u64) -> PageResponse<T> {
        PageResponse {
            items,
            page: self.page,
            size: self.size,
            total_count,
            total_pages: total_count.div_ceil(self.size),
        }
    }

    fn offset(&self) -> usize {
        usize::try_from(self.page.saturating_sub(1).saturating_mul(self.size)).unwrap_or(usize::MAX)
    }
}

/// Cut one page out of `items`.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> PageResponse<T> {
    let total_count = items.len() as u64;
    let take = usize::try_from(request.size).unwrap_or(usize::MAX);

    let items = items
        .into_iter()
        .skip(request.offset())
        .take(take)
        .collect();

    request.respond(items, total_count)
}
