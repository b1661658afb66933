//! Page-number pagination as served by the backend's list endpoints.

#[cfg(test)]
#[path = "paging_test.rs"]
mod tests;

use gateway::ApiRequest;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a listing: `{count, next, previous, results}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Number of pages at `page_size` items per page (at least 1).
    #[must_use]
    pub fn total_pages(&self, page_size: u32) -> u64 {
        let size = u64::from(page_size.max(1));
        self.count.div_ceil(size).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl PageParams {
    /// Zero values fall back to the defaults.
    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            page_size: if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size },
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self { page: self.page.saturating_add(1), ..self }
    }

    pub(crate) fn apply(self, request: ApiRequest) -> ApiRequest {
        request.query("page", self.page).query("page_size", self.page_size)
    }
}
