//! Page bookkeeping for the product grid.

use serde::{Deserialize, Serialize};

/// Products shown per grid page.
pub const ITEMS_PER_PAGE: usize = 8;

/// Requested page of the grid (1-based).
///
/// Reset to the first page whenever the filter criteria change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page: usize,
    items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            items_per_page: ITEMS_PER_PAGE,
        }
    }
}

impl PageState {
    pub fn new(page: usize) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Move to `page`, clamped to `[1, max(total_pages, 1)]`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.page = clamp_page(page, total_pages);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

/// `ceil(matched / per_page)`; zero when nothing matched.
pub fn total_pages(matched: usize, per_page: usize) -> usize {
    matched.div_ceil(per_page.max(1))
}

pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// One page of a filtered product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView<T> {
    pub items: Vec<T>,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_matched: usize,
    pub items_per_page: usize,
}

impl<T> PageView<T> {
    pub fn is_empty(&self) -> bool {
        self.total_matched == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based `(first, last, total)` of the items on this page, for the
    /// "Showing X to Y of N" footer. `None` when nothing matched.
    pub fn showing_range(&self) -> Option<(usize, usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page - 1) * self.items_per_page + 1;
        let last = first + self.items.len() - 1;
        Some((first, last, self.total_matched))
    }
}

/// Slice `matched` at `[(page-1)*per_page, page*per_page)` after clamping the
/// requested page into range.
pub fn paginate<T>(matched: Vec<T>, requested_page: usize, per_page: usize) -> PageView<T> {
    let per_page = per_page.max(1);
    let total_matched = matched.len();
    let total_pages = total_pages(total_matched, per_page);
    let page = clamp_page(requested_page, total_pages);

    let items = matched
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    PageView {
        items,
        page,
        total_pages,
        total_matched,
        items_per_page: per_page,
    }
}
