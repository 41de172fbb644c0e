/// Articles revealed per "load more" step.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Reveal-window pager. Page `n` exposes the first `n * page_size` items
/// of whatever list it is applied to; advancing grows the window rather
/// than replacing it, which is how the article wall behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A pager on page 1. A zero `page_size` is bumped to 1 so the window
    /// can always make progress.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of items the current page exposes.
    pub fn visible(&self) -> usize {
        self.page * self.page_size
    }

    /// Back to page 1. Called whenever the underlying list changes.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Grow the window by one page if `total` items leave anything hidden.
    /// Returns whether the page actually advanced.
    pub fn advance(&mut self, total: usize) -> bool {
        if self.visible() >= total {
            return false;
        }
        self.page += 1;
        true
    }

    /// True when `total` items extend past the current window.
    pub fn has_more(&self, total: usize) -> bool {
        total > self.visible()
    }

    /// The visible prefix of `items`.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible().min(items.len())]
    }
}
