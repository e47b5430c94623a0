//! The product row shared by the storefront catalog and the back office.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A product as stored by the platform.
///
/// `stock` is informational display only; the cart never enforces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price; the platform stores a numeric column.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_platform_row() {
        let row = r#"{
            "id": "3f2a",
            "name": "Silk Scarf",
            "description": "Hand rolled.",
            "price": 49.99,
            "image_url": "https://cdn.example/scarf.png",
            "category_id": "accessories",
            "stock": 12,
            "created_at": "2026-01-05T12:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(row).unwrap();
        assert_eq!(product.id, ProductId::new("3f2a"));
        assert_eq!(product.price, "49.99".parse().unwrap());
        assert_eq!(product.stock, Some(12));
    }

    #[test]
    fn test_tolerates_missing_optionals() {
        let row = r#"{"id": "p1", "name": "Bare", "price": 5}"#;
        let product: Product = serde_json::from_str(row).unwrap();
        assert!(product.image_url.is_none());
        assert!(product.created_at.is_none());
        assert_eq!(product.description, "");
    }
}
