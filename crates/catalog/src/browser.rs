//! Grid state synchronization.
//!
//! `ProductBrowser` ties the session's product list to a shared
//! `FilterStore`, the current page and the debounced search box. Every
//! method corresponds to one UI event; `view` renders nothing itself, it only
//! computes the page to show.
//!
//! The page falls back to 1 whenever the store's revision moves, no matter
//! which handle changed it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::debounce::Debouncer;
use crate::engine::filter_and_paginate;
use crate::filter::{filter_products, FilterCriteria, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
use crate::pagination::{total_pages, PageState, PageView};
use crate::product::Product;
use crate::store::FilterStore;

#[derive(Debug)]
pub struct ProductBrowser {
    products: Arc<[Product]>,
    store: FilterStore,
    page: PageState,
    seen_revision: u64,
    search: Debouncer<String>,
}

impl ProductBrowser {
    pub fn new(products: Arc<[Product]>, store: FilterStore) -> Self {
        let seen_revision = store.revision();
        Self {
            products,
            store,
            page: PageState::default(),
            seen_revision,
            search: Debouncer::default(),
        }
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search = Debouncer::new(delay);
        self
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.store.criteria()
    }

    /// The page that `view` will show.
    pub fn page(&self) -> usize {
        if self.store.revision() != self.seen_revision {
            1
        } else {
            self.page.page()
        }
    }

    pub fn view(&self) -> PageView<&Product> {
        filter_and_paginate(&self.products, &self.store.criteria(), self.page())
    }

    /// A keystroke in the search box. Applied after the quiet period.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        if self.search.schedule(text, now) {
            tracing::trace!("superseded pending search");
        }
    }

    /// Search text typed but not yet applied.
    pub fn pending_search(&self) -> Option<&str> {
        self.search.pending().map(String::as_str)
    }

    /// When the event loop should call `tick` next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Apply debounced search input whose quiet period has elapsed.
    /// Returns whether the filters changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(search) => self.apply(|c| c.search = search),
            None => false,
        }
    }

    /// Apply any pending search text right away.
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(search) => self.apply(|c| c.search = search),
            None => false,
        }
    }

    pub fn clear_search(&mut self) -> bool {
        self.search.cancel();
        self.apply(|c| c.search.clear())
    }

    /// `None` selects all categories.
    pub fn select_category(&mut self, category: Option<String>) -> bool {
        self.apply(|c| c.category = category.unwrap_or_default())
    }

    pub fn set_price_range(&mut self, min: Option<f64>, max: Option<f64>) -> bool {
        self.apply(|c| {
            c.min_price = min;
            c.max_price = max;
        })
    }

    pub fn clear_price_range(&mut self) -> bool {
        self.set_price_range(Some(DEFAULT_MIN_PRICE), Some(DEFAULT_MAX_PRICE))
    }

    /// `None` (or zero stars) accepts any rating.
    pub fn set_rating(&mut self, rating: Option<u8>) -> bool {
        let rating = rating.filter(|&stars| stars > 0);
        self.apply(|c| c.rating = rating)
    }

    pub fn reset_filters(&mut self) -> bool {
        self.search.cancel();
        let changed = self.store.reset();
        self.sync();
        changed
    }

    pub fn next_page(&mut self) -> usize {
        let page = self.page() + 1;
        self.go_to_page(page)
    }

    pub fn previous_page(&mut self) -> usize {
        let page = self.page().saturating_sub(1);
        self.go_to_page(page)
    }

    /// Jump to `page`, clamped into the current page range.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.sync();
        let matched = filter_products(self.products.iter(), &self.store.criteria()).len();
        self.page.go_to(page, total_pages(matched, self.page.items_per_page()));
        self.page.page()
    }

    fn apply<F>(&mut self, merge: F) -> bool
    where
        F: FnOnce(&mut FilterCriteria),
    {
        let changed = self.store.update(merge);
        self.sync();
        changed
    }

    /// Pick up filter changes made through any handle of the store.
    fn sync(&mut self) {
        let revision = self.store.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.page.reset();
        }
    }
}
