//! Back-office order management.
//!
//! Reads and status updates against the platform's `orders` and
//! `order_items` tables, newest first, nothing else.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use luxe_core::{OrderId, OrderStatus, ProductId};
use luxe_platform::rest::SortDirection;
use luxe_platform::{PlatformClient, PlatformError};

/// An order row as stored by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_name: String,
    pub email: String,
    pub address: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One line of an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
    pub quantity: u32,
}

/// List all orders, newest first.
///
/// # Errors
///
/// Returns [`PlatformError`] if the read fails or is refused.
pub async fn list(platform: &PlatformClient) -> Result<Vec<Order>, PlatformError> {
    platform
        .table("orders")
        .select("*")
        .order("created_at", SortDirection::Desc)
        .fetch()
        .await
}

/// Fetch the lines of one order.
///
/// # Errors
///
/// Returns [`PlatformError`] if the read fails or is refused.
pub async fn items(
    platform: &PlatformClient,
    order_id: &OrderId,
) -> Result<Vec<OrderItem>, PlatformError> {
    platform
        .table("order_items")
        .select("*")
        .eq("order_id", order_id.as_str())
        .fetch()
        .await
}

/// Move an order to a new status.
///
/// # Errors
///
/// Returns [`PlatformError`] if the update fails or is refused.
pub async fn update_status(
    platform: &PlatformClient,
    order_id: &OrderId,
    status: OrderStatus,
) -> Result<(), PlatformError> {
    platform
        .table("orders")
        .update(json!({ "status": status.as_str() }))
        .eq("id", order_id.as_str())
        .execute()
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_platform_row() {
        let row = r#"{
            "id": "ord-9",
            "buyer_name": "A Buyer",
            "email": "buyer@example.com",
            "address": "1 Main St, 10001",
            "total_price": 117.96,
            "status": "pending",
            "created_at": "2026-02-01T09:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(row).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_price, "117.96".parse().unwrap());
    }
}
