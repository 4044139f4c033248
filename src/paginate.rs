//! Client-side pagination over an already sorted listing.

use std::ops::Range;

pub fn total_pages(item_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    item_count.div_ceil(page_size)
}

/// Coerce `page` into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of the visible page, clipped to `item_count`.
pub fn page_range(item_count: usize, page: usize, page_size: usize) -> Range<usize> {
    let page = clamp_page(page, total_pages(item_count, page_size));
    let start = ((page - 1) * page_size).min(item_count);
    let end = (start + page_size).min(item_count);
    start..end
}

pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[page_range(items.len(), page, page_size)]
}

/// Page cursor. The page is stored 1-based and clamped against the item count
/// whenever it is read or moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { page: 1, page_size: 25 }
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self { page: 1, page_size: page_size.max(1) }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, item_count: usize) -> usize {
        total_pages(item_count, self.page_size)
    }

    pub fn current_page(&self, item_count: usize) -> usize {
        clamp_page(self.page, self.total_pages(item_count))
    }

    pub fn range(&self, item_count: usize) -> Range<usize> {
        page_range(item_count, self.page, self.page_size)
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Advance one page; no-op on the last page.
    pub fn next_page(&mut self, item_count: usize) {
        let current = self.current_page(item_count);
        if current < self.total_pages(item_count) {
            self.page = current + 1;
        } else {
            self.page = current;
        }
    }

    /// Go back one page; no-op on the first page.
    pub fn previous_page(&mut self, item_count: usize) {
        let current = self.current_page(item_count);
        self.page = if current > 1 { current - 1 } else { 1 };
    }

    pub fn change_page(&mut self, page: usize, item_count: usize) {
        self.page = clamp_page(page, self.total_pages(item_count));
    }

    /// Switch page size and go back to page 1. Returns `false` (and changes
    /// nothing) for a zero size.
    pub fn change_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }
}
