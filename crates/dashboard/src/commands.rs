//! One-shot dashboard commands. Each returns the rendered screen.

use std::fmt;

use anyhow::{Context, Result};

use storefront_catalog::{filter_and_paginate, DashboardStats, FilterCriteria};
use storefront_client::SessionCache;
use storefront_core::ProductId;

use crate::args::FilterArgs;
use crate::render;

/// Stat cards followed by the first page of the unfiltered grid.
pub async fn dashboard(cache: &SessionCache) -> Result<String> {
    let products = cache.products().await.context("failed to load products")?;

    let mut out = render::stats(&DashboardStats::from_products(&products));
    out.push('\n');
    out.push_str(&render::grid(&filter_and_paginate(
        &products,
        &FilterCriteria::default(),
        1,
    )));
    Ok(out)
}

pub async fn stats(cache: &SessionCache) -> Result<String> {
    let products = cache.products().await.context("failed to load products")?;
    Ok(render::stats(&DashboardStats::from_products(&products)))
}

pub async fn categories(cache: &SessionCache) -> Result<String> {
    let categories = cache.categories().await.context("failed to load categories")?;
    Ok(render::categories(&categories))
}

pub async fn products(cache: &SessionCache, filters: &FilterArgs) -> Result<String> {
    let criteria = filters.criteria().context("invalid filters")?;
    let products = cache.products().await.context("failed to load products")?;

    let view = filter_and_paginate(&products, &criteria, filters.page);
    tracing::debug!(matched = view.total_matched, page = view.page, "rendering product grid");

    let mut out = String::new();
    if let Some(badges) = render::filter_badges(&criteria) {
        out.push_str(&badges);
        out.push_str("\n\n");
    }
    out.push_str(&render::grid(&view));
    Ok(out)
}

/// Screen to show in place of the requested one when a command fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPage(pub String);

impl fmt::Display for ErrorPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Product detail page. A failed load carries the "Error Loading Product"
/// page as an [`ErrorPage`] context on the returned error.
pub async fn show(cache: &SessionCache, id: ProductId) -> Result<String> {
    match cache.product(id).await {
        Ok(product) => Ok(render::detail(&product)),
        Err(err) => {
            tracing::warn!(%id, error = %err, "product detail unavailable");
            let page = ErrorPage(render::load_error("Product", &err.to_string()));
            Err(anyhow::Error::new(err)
                .context(format!("failed to load product {id}"))
                .context(page))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storefront_catalog::{Product, Rating};
    use storefront_client::InMemoryProductSource;

    fn product(id: u64, title: &str, category: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price,
            description: format!("{title}, everyday wear"),
            category: category.to_string(),
            image: String::new(),
            rating: Rating { rate: 4.2, count: 30 },
        }
    }

    fn cache() -> SessionCache {
        let mut products: Vec<Product> = (1..=10)
            .map(|i| product(i, &format!("Cotton Shirt {i}"), "men's clothing", 10.0 * i as f64))
            .collect();
        products.push(product(11, "Silver Ring", "jewelery", 250.0));
        SessionCache::new(Arc::new(InMemoryProductSource::new(products)))
    }

    #[tokio::test]
    async fn dashboard_shows_stats_and_first_page() {
        let text = dashboard(&cache()).await.unwrap();
        assert!(text.contains("Total Products"));
        assert!(text.contains("Showing 1 to 8 of 11 products"));
    }

    #[tokio::test]
    async fn products_applies_filters_and_page() {
        let filters = FilterArgs {
            search: Some("shirt".to_string()),
            page: 2,
            ..FilterArgs::default()
        };
        let text = products(&cache(), &filters).await.unwrap();

        assert!(text.starts_with("Filters (1): Search: shirt"));
        assert!(text.contains("Cotton Shirt 9"));
        assert!(text.contains("Cotton Shirt 10"));
        assert!(!text.contains("Silver Ring"));
    }

    #[tokio::test]
    async fn products_rejects_invalid_filters() {
        let filters = FilterArgs {
            max_price: Some(f64::INFINITY),
            page: 1,
            ..FilterArgs::default()
        };
        let err = products(&cache(), &filters).await.unwrap_err();
        assert!(err.to_string().contains("invalid filters"));
    }

    #[tokio::test]
    async fn categories_lists_derived_names() {
        let text = categories(&cache()).await.unwrap();
        assert!(text.contains("Men's clothing"));
        assert!(text.contains("Jewelery"));
    }

    #[tokio::test]
    async fn show_renders_detail_or_fails() {
        let cache = cache();
        let text = show(&cache, ProductId::new(11)).await.unwrap();
        assert!(text.starts_with("Silver Ring"));

        let err = show(&cache, ProductId::new(404)).await.unwrap_err();
        let page = err.downcast_ref::<ErrorPage>().expect("error page attached");
        assert!(page.0.starts_with("Error Loading Product"));
        assert!(page.0.contains("(product 404 not found)"));
        assert!(format!("{err:#}").contains("failed to load product 404: product 404 not found"));
    }

    #[tokio::test]
    async fn show_renders_error_page_when_source_is_down() {
        let cache = SessionCache::new(Arc::new(InMemoryProductSource::unavailable("offline")));
        let err = show(&cache, ProductId::new(1)).await.unwrap_err();

        let page = err.downcast_ref::<ErrorPage>().expect("error page attached");
        assert_eq!(page.to_string(), render::load_error("Product", "network error: offline"));
    }

    #[tokio::test]
    async fn unavailable_source_is_reported() {
        let cache = SessionCache::new(Arc::new(InMemoryProductSource::unavailable("offline")));
        let err = stats(&cache).await.unwrap_err();
        assert_eq!(format!("{err:#}"), "failed to load products: network error: offline");
    }
}
