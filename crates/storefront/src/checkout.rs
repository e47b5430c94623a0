//! Order submission.
//!
//! Checkout is a straight pass-through mutation: one `orders` row with the
//! rounded grand total, then one `order_items` row per cart line. The cart
//! itself stays untouched - the caller clears it after a successful
//! submission, matching the session's ordering guarantee (in-memory state
//! first, persistence after).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use luxe_core::{Email, KeyValueStore, OrderId, OrderStatus, money};
use luxe_platform::{PlatformClient, PlatformError};

use crate::cart::Cart;

/// Errors from order submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// An empty cart cannot be submitted.
    #[error("cannot submit an order for an empty cart")]
    EmptyCart,

    /// The platform write failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Buyer details collected by the checkout form.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Buyer's display name.
    pub buyer_name: String,
    /// Contact email.
    pub email: Email,
    /// Full shipping address, one string as the platform stores it.
    pub address: String,
}

#[derive(Serialize)]
struct NewOrder<'a> {
    buyer_name: &'a str,
    email: &'a str,
    address: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    total_price: Decimal,
    status: OrderStatus,
}

#[derive(Deserialize)]
struct CreatedOrder {
    id: OrderId,
}

#[derive(Serialize)]
struct NewOrderItem<'a> {
    order_id: &'a str,
    product_id: &'a str,
    product_name: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    product_price: Decimal,
    quantity: u32,
}

/// Submit the cart as a new order and return its id.
///
/// The stored total is the grand total rounded to 2 dp
/// ([`money::round`]); line prices are stored as captured at add time.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart, or
/// [`CheckoutError::Platform`] if either insert fails.
#[tracing::instrument(skip(platform, draft, cart), fields(lines = cart.lines().count()))]
pub async fn submit_order<S: KeyValueStore>(
    platform: &PlatformClient,
    draft: &OrderDraft,
    cart: &Cart<S>,
) -> Result<OrderId, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order: CreatedOrder = platform
        .table("orders")
        .insert_one(&NewOrder {
            buyer_name: &draft.buyer_name,
            email: draft.email.as_str(),
            address: &draft.address,
            total_price: money::round(cart.total()),
            status: OrderStatus::Pending,
        })
        .await?;

    let items: Vec<NewOrderItem<'_>> = cart
        .lines()
        .map(|line| NewOrderItem {
            order_id: order.id.as_str(),
            product_id: line.id.as_str(),
            product_name: &line.name,
            product_price: line.price,
            quantity: line.quantity,
        })
        .collect();

    platform.table("order_items").insert(&items).await?;

    tracing::info!(order_id = %order.id, "order submitted");
    Ok(order.id)
}
