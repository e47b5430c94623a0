//! The in-session shopping cart.
//!
//! The cart is the authoritative record of what the shopper intends to
//! buy: at most one line per product, quantity always at least one. It is
//! owned by the current client session, hydrated once from the local
//! key-value store at startup, and written back through that store before
//! every mutation returns. A corrupt or missing snapshot hydrates to an
//! empty cart, never an error.
//!
//! Consumers that need to react to changes (badge counts, toasts) register
//! an observer; there is no global singleton.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use luxe_core::{KeyValueStore, ProductId, StorageError};

use crate::catalog::Product;
use crate::pricing;

/// Key the cart snapshot is stored under.
pub const CART_STORAGE_KEY: &str = "luxe_cart";

/// Errors from cart mutations.
///
/// Reads never fail; mutations only fail if the resulting snapshot cannot
/// be persisted.
#[derive(Debug, Error)]
pub enum CartError {
    /// The local store rejected the snapshot write.
    #[error("cart snapshot could not be persisted: {0}")]
    Storage(#[from] StorageError),

    /// The snapshot could not be encoded.
    #[error("cart snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One product's aggregated quantity and price within the cart.
///
/// Field names match the persisted snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product identifier; unique within the cart.
    pub id: ProductId,
    /// Display name, denormalized at add time.
    pub name: String,
    /// Unit price in the store's base currency.
    pub price: Decimal,
    /// Hosted image URL, if the product has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Inline image data, if the product carries one instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Quantity; always >= 1 for a stored line.
    pub quantity: u32,
}

impl CartLine {
    /// `unit price x quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A change the cart just made, delivered to observers after the new state
/// has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added (or its quantity merged into an existing line).
    ItemAdded {
        id: ProductId,
        name: String,
        quantity: u32,
    },
    /// A line was removed.
    ItemRemoved { id: ProductId },
    /// A line's quantity was replaced.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// All lines were removed.
    Cleared,
}

type Observer = Box<dyn Fn(&CartEvent) + Send + Sync>;

/// The session cart and pricing engine.
///
/// Generic over the durable store so tests can run against an in-memory
/// implementation.
pub struct Cart<S> {
    lines: BTreeMap<ProductId, CartLine>,
    store: S,
    observers: Vec<Observer>,
}

impl<S> std::fmt::Debug for Cart<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: KeyValueStore> Cart<S> {
    /// Hydrate a cart from the last persisted snapshot.
    ///
    /// Missing, empty, or corrupt snapshots fall back to an empty cart;
    /// the corrupt case is logged and discarded, never surfaced.
    #[must_use]
    pub fn load(store: S) -> Self {
        let lines = match store.get(CART_STORAGE_KEY) {
            Ok(Some(snapshot)) if !snapshot.is_empty() => {
                match serde_json::from_str::<Vec<CartLine>>(&snapshot) {
                    Ok(parsed) => Self::sanitize(parsed),
                    Err(err) => {
                        tracing::warn!(error = %err, "discarding corrupt cart snapshot");
                        BTreeMap::new()
                    }
                }
            }
            Ok(_) => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(error = %err, "cart snapshot unreadable, starting empty");
                BTreeMap::new()
            }
        };

        Self {
            lines,
            store,
            observers: Vec::new(),
        }
    }

    /// Rebuild the line map from a parsed snapshot, enforcing the cart
    /// invariants: zero-quantity lines are dropped, duplicate product ids
    /// are merged.
    fn sanitize(parsed: Vec<CartLine>) -> BTreeMap<ProductId, CartLine> {
        let mut lines = BTreeMap::new();
        for line in parsed {
            if line.quantity == 0 {
                continue;
            }
            lines
                .entry(line.id.clone())
                .and_modify(|existing: &mut CartLine| {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                })
                .or_insert(line);
        }
        lines
    }

    /// Register an observer for cart changes.
    pub fn subscribe(&mut self, observer: impl Fn(&CartEvent) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self, event: &CartEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }

    /// Write the current state through the store.
    fn persist(&self) -> Result<(), CartError> {
        let snapshot = serde_json::to_string(&self.lines.values().collect::<Vec<_>>())?;
        self.store.set(CART_STORAGE_KEY, &snapshot)?;
        Ok(())
    }

    /// Add `quantity` of a product, merging into an existing line.
    ///
    /// No stock limit is enforced here; stock is informational display
    /// only.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] only if the new snapshot cannot be persisted.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }

        self.lines
            .entry(product.id.clone())
            .and_modify(|line| line.quantity = line.quantity.saturating_add(quantity))
            .or_insert_with(|| CartLine {
                id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                image_data: product.image_data.clone(),
                quantity,
            });

        self.persist()?;
        self.notify(&CartEvent::ItemAdded {
            id: product.id.clone(),
            name: product.name.clone(),
            quantity,
        });
        Ok(())
    }

    /// Remove a product's line. Absent products are a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] only if the new snapshot cannot be persisted.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<(), CartError> {
        if self.lines.remove(id).is_none() {
            return Ok(());
        }

        self.persist()?;
        self.notify(&CartEvent::ItemRemoved { id: id.clone() });
        Ok(())
    }

    /// Replace a line's quantity; zero (or absent line with zero) removes
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] only if the new snapshot cannot be persisted.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(id);
        }

        let Some(line) = self.lines.get_mut(id) else {
            return Ok(());
        };
        line.quantity = quantity;

        self.persist()?;
        self.notify(&CartEvent::QuantityChanged {
            id: id.clone(),
            quantity,
        });
        Ok(())
    }

    /// Remove all lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] only if the new snapshot cannot be persisted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.lines.clear();
        self.persist()?;
        self.notify(&CartEvent::Cleared);
        Ok(())
    }

    /// Sum of quantities across all lines; zero for an empty cart.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines.values().map(|l| u64::from(l.quantity)).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.get(id)
    }

    /// All lines, in product-id order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Sum over all lines of `unit price x quantity`, exact.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        pricing::subtotal(self.lines())
    }

    /// Flat 8% tax on the subtotal, exact (round at display time).
    #[must_use]
    pub fn tax(&self) -> Decimal {
        pricing::tax(self.subtotal())
    }

    /// Shipping fee: free at or above the threshold, flat below it.
    #[must_use]
    pub fn shipping_fee(&self) -> Decimal {
        pricing::shipping_fee(self.subtotal())
    }

    /// Grand total: subtotal + tax + shipping.
    #[must_use]
    pub fn total(&self) -> Decimal {
        pricing::total(self.subtotal())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use luxe_platform::MemoryStore;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: price.parse().unwrap(),
            image_url: None,
            image_data: None,
            category_id: None,
            stock: Some(10),
            created_at: None,
        }
    }

    fn empty_cart() -> Cart<MemoryStore> {
        Cart::load(MemoryStore::new())
    }

    #[test]
    fn test_add_merges_quantities_into_one_line() {
        let mut cart = empty_cart();
        let p = product("p1", "10.00");

        cart.add_item(&p, 2).unwrap();
        cart.add_item(&p, 3).unwrap();

        assert_eq!(cart.lines().count(), 1);
        assert_eq!(cart.line(&p.id).unwrap().quantity, 5);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = empty_cart();
        let p = product("p1", "10.00");
        cart.add_item(&p, 1).unwrap();

        cart.remove_item(&p.id).unwrap();
        assert!(cart.is_empty());
        // second removal is a no-op, not an error
        cart.remove_item(&p.id).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = empty_cart();
        let p = product("p1", "10.00");
        cart.add_item(&p, 4).unwrap();

        cart.set_quantity(&p.id, 0).unwrap();
        assert!(cart.line(&p.id).is_none());
    }

    #[test]
    fn test_set_quantity_replaces_value() {
        let mut cart = empty_cart();
        let p = product("p1", "10.00");
        cart.add_item(&p, 4).unwrap();

        cart.set_quantity(&p.id, 2).unwrap();
        assert_eq!(cart.line(&p.id).unwrap().quantity, 2);
        // unknown products are ignored
        cart.set_quantity(&ProductId::new("ghost"), 3).unwrap();
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_count_tracks_all_mutations() {
        let mut cart = empty_cart();
        let p1 = product("p1", "10.00");
        let p2 = product("p2", "5.00");

        cart.add_item(&p1, 2).unwrap();
        cart.add_item(&p2, 1).unwrap();
        assert_eq!(cart.count(), 3);

        cart.set_quantity(&p1.id, 1).unwrap();
        assert_eq!(cart.count(), 2);

        cart.clear().unwrap();
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_pricing_figures() {
        let mut cart = empty_cart();
        cart.add_item(&product("p1", "49.99"), 2).unwrap();

        assert_eq!(cart.subtotal(), "99.98".parse().unwrap());
        assert_eq!(cart.tax(), "7.9984".parse().unwrap());
        assert_eq!(cart.shipping_fee(), "9.99".parse().unwrap());
        assert_eq!(
            cart.total(),
            cart.subtotal() + cart.tax() + cart.shipping_fee()
        );
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_lines() {
        let store = Arc::new(MemoryStore::new());
        let mut cart = Cart::load(Arc::clone(&store));
        cart.add_item(&product("b", "1.50"), 2).unwrap();
        cart.add_item(&product("a", "20.00"), 1).unwrap();

        let rehydrated = Cart::load(Arc::clone(&store));
        let lines: Vec<_> = rehydrated.lines().cloned().collect();
        let original: Vec<_> = cart.lines().cloned().collect();
        assert_eq!(lines, original);
        assert_eq!(rehydrated.count(), 3);
    }

    #[test]
    fn test_corrupt_snapshot_hydrates_empty() {
        let store = MemoryStore::with_entries([(
            CART_STORAGE_KEY.to_owned(),
            "{not json".to_owned(),
        )]);
        let cart = Cart::load(store);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_with_zero_quantity_and_duplicates_is_sanitized() {
        let snapshot = r#"[
            {"id":"p1","name":"One","price":"2.00","quantity":0},
            {"id":"p2","name":"Two","price":"3.00","quantity":1},
            {"id":"p2","name":"Two","price":"3.00","quantity":2}
        ]"#;
        let store =
            MemoryStore::with_entries([(CART_STORAGE_KEY.to_owned(), snapshot.to_owned())]);
        let cart = Cart::load(store);

        assert!(cart.line(&ProductId::new("p1")).is_none());
        assert_eq!(cart.line(&ProductId::new("p2")).unwrap().quantity, 3);
    }

    #[test]
    fn test_observers_see_events_after_persist() {
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = Arc::clone(&seen);

        let store = Arc::new(MemoryStore::new());
        let mut cart = Cart::load(Arc::clone(&store));
        cart.subscribe(move |event| {
            if matches!(event, CartEvent::ItemAdded { .. }) {
                seen_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        cart.add_item(&product("p1", "10.00"), 1).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        // the snapshot was written before the observer ran
        assert!(store.get(CART_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_add_zero_quantity_is_a_no_op() {
        let mut cart = empty_cart();
        cart.add_item(&product("p1", "10.00"), 0).unwrap();
        assert!(cart.is_empty());
    }
}
