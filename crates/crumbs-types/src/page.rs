//! Pagination envelope for list operations.

use serde::{Deserialize, Serialize};

/// Page metadata returned alongside every list result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u64,
    pub page_size: u64,
    /// Total matching records across all pages.
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Build metadata for a request, clamping degenerate inputs: page
    /// defaults to 1 and page size to a minimum of 1.
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        Self {
            page,
            page_size,
            total,
            total_pages: total.div_ceil(page_size),
        }
    }

    /// Number of records to skip to reach this page.
    ///
    /// Saturates instead of overflowing, so an absurd page number yields
    /// an offset past every record and an empty page rather than a panic.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// One page of results plus its metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// An empty page for a query that matched nothing.
    pub fn empty(page: u64, page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(page, page_size, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination::new(1, 10, 21);
        assert_eq!(p.total_pages, 3);

        let exact = Pagination::new(1, 10, 20);
        assert_eq!(exact.total_pages, 2);
    }

    #[test]
    fn degenerate_inputs_are_clamped() {
        let p = Pagination::new(0, 0, 5);
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn offset_skips_earlier_pages() {
        let p = Pagination::new(3, 10, 100);
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn offset_saturates_for_absurd_page_numbers() {
        let p = Pagination::new(u64::MAX, u64::MAX, 5);
        assert_eq!(p.offset(), u64::MAX);
    }
}
