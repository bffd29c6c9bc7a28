//! Client-side pagination over a fully fetched result list.

/// Orders shown per page.
pub const ORDERS_PER_PAGE: usize = 6;

/// `max(1, ceil(len / page_size))`; a zero page size counts as one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
}

/// Slices `items` for `page`, clamping the page into `[1, total_pages]` first.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let number = page.clamp(1, total_pages);
    let start = ((number - 1) * page_size).min(items.len());
    let end = (number * page_size).min(items.len());
    Page {
        items: &items[start..end],
        number,
        total_pages,
    }
}

/// Current page plus the page count derived from the result size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
    total_pages: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(ORDERS_PER_PAGE)
    }
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_pages: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Recomputes the page count for a new result size and moves back to page 1.
    pub fn reset(&mut self, len: usize) {
        self.total_pages = total_pages(len, self.page_size);
        self.current_page = 1;
    }

    /// Accepts `requested` only inside `[1, total_pages]`; out-of-range
    /// requests leave the state untouched and return `false`.
    pub fn change_page(&mut self, requested: usize) -> bool {
        if requested == 0 || requested > self.total_pages {
            return false;
        }
        self.current_page = requested;
        true
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn next_page(&mut self) -> bool {
        self.change_page(self.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.current_page.checked_sub(1) {
            Some(page) => self.change_page(page),
            None => false,
        }
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.current_page, self.page_size)
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
