//! Back-office product management.
//!
//! Thin pass-through writes against the platform's `products` table. The
//! platform's access rules decide whether the caller may actually write;
//! nothing here re-checks the session gate.

use rust_decimal::Decimal;
use serde::Serialize;

use luxe_core::{Product, ProductId};
use luxe_platform::{PlatformClient, PlatformError};

/// Fields accepted when creating or updating a product.
#[derive(Debug, Clone, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

/// Create a product and return the stored row.
///
/// # Errors
///
/// Returns [`PlatformError`] if the insert fails or is refused.
pub async fn create(
    platform: &PlatformClient,
    input: &ProductInput,
) -> Result<Product, PlatformError> {
    platform.table("products").insert_one(input).await
}

/// Update an existing product in place.
///
/// # Errors
///
/// Returns [`PlatformError`] if the update fails or is refused.
pub async fn update(
    platform: &PlatformClient,
    id: &ProductId,
    input: &ProductInput,
) -> Result<(), PlatformError> {
    platform
        .table("products")
        .update(input)
        .eq("id", id.as_str())
        .execute()
        .await
}

/// Delete a product.
///
/// # Errors
///
/// Returns [`PlatformError`] if the delete fails or is refused.
pub async fn delete(platform: &PlatformClient, id: &ProductId) -> Result<(), PlatformError> {
    platform
        .table("products")
        .delete()
        .eq("id", id.as_str())
        .execute()
        .await
}
