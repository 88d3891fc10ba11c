//! Product catalog client.
//!
//! Read-only access to the demo catalog API (`fakestoreapi.com` by
//! default) over `reqwest`. Responses are cached in memory with `moka`
//! (5-minute TTL by default). The catalog is an outside collaborator: its
//! records are passed through as-is, never validated against the cart.

mod cache;
mod fixtures;

pub use fixtures::featured_products;

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use shopshifter_core::{Product, ProductId};

use crate::config::CatalogConfig;
use cache::{CacheKey, CacheValue};

/// How many related products the detail view shows.
pub const RELATED_PRODUCT_LIMIT: usize = 4;

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog returned HTTP {status}")]
    Status {
        /// Response status code.
        status: u16,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The configured base URL can't take a path.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the product catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client can't be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(config.cache_ttl)
            .build();

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    /// Build the URL for `segments` under the base URL. Segments are
    /// percent-encoded, so categories like `men's clothing` are safe.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        build_endpoint(&self.inner.base_url, segments)
    }

    /// GET a JSON document. An empty or `null` body reads as `None`.
    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, CatalogError> {
        let response = self.inner.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(
                status = %status,
                url = %url,
                body = %body.chars().take(200).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        parse_body(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                url = %url,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse catalog response"
            );
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Products(products)) =
            self.inner.cache.get(&CacheKey::Products).await
        {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let url = self.endpoint(&["products"])?;
        let products: Vec<Product> = self.fetch(url).await?.unwrap_or_default();
        debug!(count = products.len(), "Fetched product list");

        self.inner
            .cache
            .insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such product,
    /// or an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&["products", &id.to_string()])?;
        let product: Product = self
            .fetch(url)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Product not found: {id}")))?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Names of all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, CatalogError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let url = self.endpoint(&["products", "categories"])?;
        let categories: Vec<String> = self.fetch(url).await?.unwrap_or_default();

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;
        Ok(categories)
    }

    /// Products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products_in_category(&self, category: &str) -> Result<Vec<Product>, CatalogError> {
        let key = CacheKey::Category(category.to_owned());
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for category");
            return Ok(products);
        }

        let url = self.endpoint(&["products", "category", category])?;
        let products: Vec<Product> = self.fetch(url).await?.unwrap_or_default();

        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Up to `limit` other products from the same category as `product`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn related_products(
        &self,
        product: &Product,
        limit: usize,
    ) -> Result<Vec<Product>, CatalogError> {
        let candidates = self.products_in_category(&product.category).await?;
        Ok(select_related(candidates, product.id, limit))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn build_endpoint(base: &Url, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<Option<T>, CatalogError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Drop `exclude` from `candidates` and keep the first `limit`.
#[must_use]
pub fn select_related(candidates: Vec<Product>, exclude: ProductId, limit: usize) -> Vec<Product> {
    candidates
        .into_iter()
        .filter(|p| p.id != exclude)
        .take(limit)
        .collect()
}
