//! The product catalog collaborator.

use std::sync::atomic::{AtomicUsize, Ordering};

use storefront_catalog::Product;
use storefront_core::ProductId;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Read-only access to the catalog.
///
/// Any implementation returning products in the catalog API shape can stand
/// in for the HTTP source (tests, offline fixtures).
#[async_trait::async_trait]
pub trait ProductSource: Send + Sync {
    /// Every product in the catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError>;

    /// Category names, as the catalog lists them.
    async fn fetch_categories(&self) -> Result<Vec<String>, SourceError>;

    /// A single product by id.
    async fn fetch_product(&self, id: ProductId) -> Result<Product, SourceError>;
}

/// In-memory catalog for tests and offline fixtures.
#[derive(Debug, Default)]
pub struct InMemoryProductSource {
    products: Vec<Product>,
    categories: Option<Vec<String>>,
    failure: Option<String>,
    requests: AtomicUsize,
}

impl InMemoryProductSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Load products from a JSON array in the catalog API shape.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| SourceError::Parse(e.to_string()))?;
        Ok(Self::new(products))
    }

    /// A source whose every request fails with a network error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Override the category list (otherwise derived from the products).
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Number of requests served so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn begin_request(&self) -> Result<(), SourceError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(SourceError::Network(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl ProductSource for InMemoryProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        self.begin_request()?;
        Ok(self.products.clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, SourceError> {
        self.begin_request()?;
        if let Some(categories) = &self.categories {
            return Ok(categories.clone());
        }

        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, SourceError> {
        self.begin_request()?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(SourceError::NotFound(id))
    }
}
