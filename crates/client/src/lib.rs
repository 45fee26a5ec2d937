//! `storefront-client`
//!
//! **Responsibility:** talk to the product catalog collaborator.
//!
//! This crate provides:
//! - The `ProductSource` seam (HTTP and in-memory implementations)
//! - A per-session cache (the product list is fetched once per session)
//! - `LoadState`, the loading/error indicator handed to presentation
//!
//! The catalog API is the authority; nothing is persisted locally.

pub mod cache;
pub mod config;
pub mod http;
pub mod load;
pub mod source;

pub use cache::SessionCache;
pub use config::ClientConfig;
pub use http::HttpProductSource;
pub use load::LoadState;
pub use source::{InMemoryProductSource, ProductSource, SourceError};
