//! HTTP implementation of the product source.

use serde::de::DeserializeOwned;

use storefront_catalog::Product;
use storefront_core::ProductId;

use crate::config::ClientConfig;
use crate::source::{ProductSource, SourceError};

/// Client for the catalog REST API (`GET /products`,
/// `GET /products/categories`, `GET /products/{id}`).
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    api_url: String,
}

impl HttpProductSource {
    pub fn new(config: &ClientConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET `path` and return the raw body of a successful response.
    async fn get_body(&self, path: &str) -> Result<(reqwest::StatusCode, String), SourceError> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!(%url, "requesting catalog");

        let resp = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "catalog request failed");
            SourceError::Network(e.to_string())
        })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok((status, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let (status, body) = self.get_body(path).await?;
        if !status.is_success() {
            return Err(SourceError::Api(status.as_u16(), body));
        }
        parse(&body)
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    serde_json::from_str(body).map_err(|e| SourceError::Parse(e.to_string()))
}

#[async_trait::async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, SourceError> {
        let products: Vec<Product> = self.get_json("/products").await?;
        tracing::info!(count = products.len(), "fetched products");
        Ok(products)
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, SourceError> {
        let categories: Vec<String> = self.get_json("/products/categories").await?;
        tracing::info!(count = categories.len(), "fetched categories");
        Ok(categories)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, SourceError> {
        let (status, body) = self.get_body(&format!("/products/{id}")).await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(id));
        }
        if !status.is_success() {
            return Err(SourceError::Api(status.as_u16(), body));
        }
        // The demo API answers unknown ids with an empty 200.
        if body.trim().is_empty() || body.trim() == "null" {
            return Err(SourceError::NotFound(id));
        }
        parse(&body)
    }
}
