//! `storefront-core`: shared building blocks.
//!
//! This crate contains **pure** primitives (no IO): typed identifiers and the
//! domain error model used by the catalog, client and dashboard crates.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
