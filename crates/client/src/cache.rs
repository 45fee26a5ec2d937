//! Per-session cache of catalog data.
//!
//! The product list and the category list are fetched at most once per
//! session and then shared read-only. Concurrent first requests wait on the
//! same fetch instead of issuing their own.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use storefront_catalog::Product;
use storefront_core::ProductId;

use crate::load::LoadState;
use crate::source::{ProductSource, SourceError};

#[derive(Debug)]
struct Cached<T: ?Sized> {
    value: Arc<T>,
    fetched_at: DateTime<Utc>,
}

pub struct SessionCache {
    source: Arc<dyn ProductSource>,
    products: Mutex<Option<Cached<[Product]>>>,
    categories: Mutex<Option<Cached<[String]>>>,
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache").finish_non_exhaustive()
    }
}

impl SessionCache {
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            source,
            products: Mutex::new(None),
            categories: Mutex::new(None),
        }
    }

    /// The full product list, fetched on first use.
    ///
    /// A failed fetch is not cached; the next call tries again.
    pub async fn products(&self) -> Result<Arc<[Product]>, SourceError> {
        let mut guard = self.products.lock().await;
        if let Some(cached) = guard.as_ref() {
            tracing::debug!(count = cached.value.len(), "product cache hit");
            return Ok(cached.value.clone());
        }

        tracing::debug!("product cache miss");
        let products: Arc<[Product]> = self.source.fetch_products().await?.into();
        *guard = Some(Cached {
            value: products.clone(),
            fetched_at: Utc::now(),
        });
        Ok(products)
    }

    pub async fn categories(&self) -> Result<Arc<[String]>, SourceError> {
        let mut guard = self.categories.lock().await;
        if let Some(cached) = guard.as_ref() {
            return Ok(cached.value.clone());
        }

        let categories: Arc<[String]> = self.source.fetch_categories().await?.into();
        *guard = Some(Cached {
            value: categories.clone(),
            fetched_at: Utc::now(),
        });
        Ok(categories)
    }

    /// A single product: served from the cached list when it has been
    /// loaded, otherwise fetched individually (not cached).
    pub async fn product(&self, id: ProductId) -> Result<Product, SourceError> {
        {
            let guard = self.products.lock().await;
            if let Some(cached) = guard.as_ref() {
                return cached
                    .value
                    .iter()
                    .find(|p| p.id == id)
                    .cloned()
                    .ok_or(SourceError::NotFound(id));
            }
        }

        self.source.fetch_product(id).await
    }

    /// `products()` as a presentation indicator.
    pub async fn load_products(&self) -> LoadState<Arc<[Product]>> {
        let result = self.products().await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "failed to load products");
        }
        result.into()
    }

    pub async fn load_categories(&self) -> LoadState<Arc<[String]>> {
        let result = self.categories().await;
        if let Err(err) = &result {
            tracing::error!(error = %err, "failed to load categories");
        }
        result.into()
    }

    /// When the product list was fetched, if it has been.
    pub async fn products_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.products.lock().await.as_ref().map(|c| c.fetched_at)
    }

    /// Drop everything cached; the next access refetches.
    pub async fn invalidate(&self) {
        *self.products.lock().await = None;
        *self.categories.lock().await = None;
        tracing::debug!("session cache invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryProductSource;
    use storefront_catalog::Rating;

    fn product(id: u64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: 10.0 * id as f64,
            description: String::new(),
            category: category.to_string(),
            image: String::new(),
            rating: Rating { rate: 3.5, count: 1 },
        }
    }

    fn source() -> Arc<InMemoryProductSource> {
        Arc::new(InMemoryProductSource::new(vec![
            product(1, "electronics"),
            product(2, "jewelery"),
        ]))
    }

    #[tokio::test]
    async fn fetches_products_once_per_session() {
        let source = source();
        let cache = SessionCache::new(source.clone());

        let first = cache.products().await.unwrap();
        let second = cache.products().await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.request_count(), 1);
        assert!(cache.products_fetched_at().await.is_some());
    }

    #[tokio::test]
    async fn concurrent_first_requests_share_one_fetch() {
        let source = source();
        let cache = Arc::new(SessionCache::new(source.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.products().await.map(|p| p.len()) })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), 2);
        }

        assert_eq!(source.request_count(), 1);
    }

    #[tokio::test]
    async fn product_detail_uses_cached_list() {
        let source = source();
        let cache = SessionCache::new(source.clone());

        cache.products().await.unwrap();
        let detail = cache.product(ProductId::new(2)).await.unwrap();

        assert_eq!(detail.category, "jewelery");
        assert_eq!(source.request_count(), 1);
        assert!(matches!(
            cache.product(ProductId::new(7)).await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn product_detail_falls_back_to_source() {
        let source = source();
        let cache = SessionCache::new(source.clone());

        let detail = cache.product(ProductId::new(1)).await.unwrap();
        assert_eq!(detail.id, ProductId::new(1));
        assert_eq!(source.request_count(), 1);
        assert!(cache.products_fetched_at().await.is_none());
    }

    #[tokio::test]
    async fn categories_are_cached_separately() {
        let source = source();
        let cache = SessionCache::new(source.clone());

        let categories = cache.categories().await.unwrap();
        cache.categories().await.unwrap();

        assert_eq!(&*categories, &["electronics".to_string(), "jewelery".to_string()]);
        assert_eq!(source.request_count(), 1);
    }

    #[tokio::test]
    async fn failures_surface_as_load_state_and_are_retried() {
        let source = Arc::new(InMemoryProductSource::unavailable("connection refused"));
        let cache = SessionCache::new(source.clone());

        let state = cache.load_products().await;
        assert_eq!(state.error(), Some("network error: connection refused"));

        assert!(cache.load_categories().await.error().is_some());
        assert!(cache.products().await.is_err());
        assert_eq!(source.request_count(), 3);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let source = source();
        let cache = SessionCache::new(source.clone());

        cache.products().await.unwrap();
        cache.invalidate().await;
        cache.products().await.unwrap();

        assert_eq!(source.request_count(), 2);
    }
}
