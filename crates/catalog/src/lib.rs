//! Catalog domain module.
//!
//! This crate contains the product catalog rules, implemented purely as
//! deterministic logic (no IO, no HTTP, no storage):
//! - `product`: the product record as served by the catalog API
//! - `filter` / `pagination` / `engine`: the filter/paginate engine
//! - `store`: the shared filter state handed to every consumer of a view
//! - `debounce`: explicit schedule/cancel timer for search input
//! - `browser`: grid state synchronization (filters, page, debounced search)
//! - `stats`: dashboard statistics

pub mod browser;
pub mod debounce;
pub mod engine;
pub mod filter;
pub mod pagination;
pub mod product;
pub mod stats;
pub mod store;

pub use browser::ProductBrowser;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use engine::filter_and_paginate;
pub use filter::{filter_products, FilterCriteria, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE};
pub use pagination::{paginate, PageState, PageView, ITEMS_PER_PAGE};
pub use product::{capitalize, Product, Rating};
pub use stats::DashboardStats;
pub use store::FilterStore;

#[cfg(test)]
mod fixtures;
