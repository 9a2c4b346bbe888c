use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Rows shown per table page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// 1-based pagination over the active row set.
///
/// The pager never sees the rows themselves, only their count, and every
/// request is clamped so the produced slice bounds are always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    page_size: usize,
    page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Pager { page_size, page: 1 }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `ceil(count / page_size)`; zero when there are no rows.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size)
    }

    /// Back to page 1. Applied on every search or filter mutation.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Move to `page`, clamped into `[1, max(1, total_pages)]` so an
    /// out-of-range request can never produce an out-of-bounds slice.
    pub fn request(&mut self, page: usize, count: usize) {
        let last = self.total_pages(count).max(1);
        self.page = page.clamp(1, last);
    }

    /// Half-open index range of the current page, clipped to `count`.
    pub fn bounds(&self, count: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(count);
        let end = (self.page * self.page_size).min(count);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hundred_twenty_rows_make_three_pages() {
        let mut pager = Pager::default();
        assert_eq!(pager.total_pages(120), 3);

        pager.request(3, 120);
        assert_eq!(pager.bounds(120), 100..120);
    }

    #[test]
    fn page_slices_partition_the_rows() {
        let mut pager = Pager::new(7);
        for count in [0usize, 1, 6, 7, 8, 49, 120] {
            let mut covered = 0;
            for page in 1..=pager.total_pages(count) {
                pager.request(page, count);
                let bounds = pager.bounds(count);
                assert!(bounds.len() <= 7);
                assert_eq!(bounds.start, covered);
                covered = bounds.end;
            }
            assert_eq!(covered, count);
        }
    }

    #[test]
    fn out_of_range_requests_clamp() {
        let mut pager = Pager::default();
        pager.request(99, 120);
        assert_eq!(pager.page(), 3);

        pager.request(0, 120);
        assert_eq!(pager.page(), 1);

        // Zero rows: page stays 1 and the slice is empty.
        pager.request(5, 0);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.bounds(0), 0..0);
    }
}
