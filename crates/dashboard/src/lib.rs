//! `storefront-dashboard`
//!
//! Terminal presentation of the product catalog: stat cards, the filtered
//! product grid, product detail pages and an interactive browse loop.

pub mod args;
pub mod browse;
pub mod commands;
pub mod render;
