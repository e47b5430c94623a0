//! Product catalog queries.
//!
//! Straight pass-through reads against the platform's `products` and
//! `categories` tables, cached with `moka` (5-minute TTL) since listings
//! change rarely and render often.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use luxe_core::ProductId;
use luxe_platform::rest::SortDirection;
use luxe_platform::{PlatformClient, PlatformError};

pub use luxe_core::Product;

/// Errors from catalog reads.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The platform call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// No product exists with the given id.
    #[error("product not found: {id}")]
    ProductNotFound {
        /// The id that matched nothing.
        id: ProductId,
    },
}

/// A category row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductSort {
    /// Most recently created first (the storefront default).
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
    Name,
}

impl ProductSort {
    const fn column_and_direction(self) -> (&'static str, SortDirection) {
        match self {
            Self::Newest => ("created_at", SortDirection::Desc),
            Self::PriceLowToHigh => ("price", SortDirection::Asc),
            Self::PriceHighToLow => ("price", SortDirection::Desc),
            Self::Name => ("name", SortDirection::Asc),
        }
    }

    const fn cache_tag(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLowToHigh => "price-asc",
            Self::PriceHighToLow => "price-desc",
            Self::Name => "name",
        }
    }
}

/// Listing filter: optional category restriction plus a sort order.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Keep only products in this category.
    pub category_id: Option<String>,
    /// Sort order.
    pub sort: ProductSort,
}

/// Cached catalog reader.
///
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct Catalog {
    platform: PlatformClient,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl Catalog {
    /// Cache TTL for listings.
    const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Create a catalog reader over the given platform client.
    #[must_use]
    pub fn new(platform: PlatformClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Self::CACHE_TTL)
            .build();
        Self { platform, cache }
    }

    /// List products matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Platform`] if the platform read fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Arc<Vec<Product>>, CatalogError> {
        let cache_key = format!(
            "products:{}:{}",
            filter.category_id.as_deref().unwrap_or("all"),
            filter.sort.cache_tag()
        );

        if let Some(products) = self.cache.get(&cache_key).await {
            debug!("cache hit for product listing");
            return Ok(products);
        }

        let (column, direction) = filter.sort.column_and_direction();
        let mut query = self.platform.table("products").select("*");
        if let Some(category_id) = &filter.category_id {
            query = query.eq("category_id", category_id);
        }
        let products: Vec<Product> = query.order(column, direction).fetch().await?;

        let products = Arc::new(products);
        self.cache.insert(cache_key, Arc::clone(&products)).await;
        Ok(products)
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for unknown ids, or
    /// [`CatalogError::Platform`] if the read fails.
    pub async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.platform
            .table("products")
            .select("*")
            .eq("id", id.as_str())
            .maybe_single()
            .await?
            .ok_or_else(|| CatalogError::ProductNotFound { id: id.clone() })
    }

    /// List all categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Platform`] if the platform read fails.
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self
            .platform
            .table("categories")
            .select("*")
            .order("name", SortDirection::Asc)
            .fetch()
            .await?)
    }
}
