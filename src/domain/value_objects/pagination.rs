//! Offset pagination for list endpoints.

use serde::Serialize;

/// A validated page request.
///
/// `page` is 1-based and both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    pub const DEFAULT_PAGE: u32 = 1;

    /// Build a page request from raw query-string values.
    ///
    /// Missing, unparseable or non-positive values fall back to the defaults
    /// instead of failing the request. Page sizes above `max_size` are clamped.
    pub fn from_raw(
        page: Option<&str>,
        page_size: Option<&str>,
        default_size: u32,
        max_size: u32,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(Self::DEFAULT_PAGE);
        let page_size = parse_positive(page_size)
            .unwrap_or(default_size)
            .min(max_size)
            .max(1);

        Self { page, page_size }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: 10,
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n >= 1)
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            pagination,
        }
    }

    /// Total number of pages, rounding up. Zero when nothing matched.
    pub fn total_pages(&self) -> i64 {
        let size = i64::from(self.pagination.page_size);
        (self.total.max(0) + size - 1) / size
    }

    /// Transform every item, keeping the paging information.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pagination: self.pagination,
        }
    }
}
