//! Cart snapshot round trips over the on-disk key-value store.
//!
//! Each test gets its own directory under the system temp dir, so the
//! suite can run in parallel and leaves nothing behind on success.

use std::path::PathBuf;

use rust_decimal::Decimal;
use uuid::Uuid;

use luxe_core::{KeyValueStore, Product, ProductId};
use luxe_platform::LocalStore;
use luxe_storefront::{CART_STORAGE_KEY, Cart};

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("luxe-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("failed to create temp dir");
        Self(path)
    }

    fn store(&self) -> LocalStore {
        LocalStore::open(&self.0).expect("failed to open store")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn product(id: &str, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: String::new(),
        price: price.parse().expect("bad test price"),
        image_url: None,
        image_data: None,
        category_id: None,
        stock: None,
        created_at: None,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().expect("bad test decimal")
}

#[test]
fn cart_survives_reload_from_disk() {
    let dir = TempDir::new();

    {
        let mut cart = Cart::load(dir.store());
        cart.add_item(&product("p1", "Silk Scarf", "49.99"), 2)
            .expect("add failed");
        cart.add_item(&product("p2", "Leather Belt", "35.00"), 1)
            .expect("add failed");
    }

    let cart = Cart::load(dir.store());
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.subtotal(), dec("134.98"));
    assert_eq!(
        cart.line(&ProductId::new("p1")).map(|l| l.quantity),
        Some(2)
    );
}

#[test]
fn mutations_are_persisted_immediately() {
    let dir = TempDir::new();

    let mut cart = Cart::load(dir.store());
    cart.add_item(&product("p1", "Silk Scarf", "49.99"), 1)
        .expect("add failed");
    cart.set_quantity(&ProductId::new("p1"), 5)
        .expect("set failed");

    // a second reader opened mid-session sees the latest snapshot
    let other = Cart::load(dir.store());
    assert_eq!(other.count(), 5);

    cart.remove_item(&ProductId::new("p1")).expect("remove failed");
    let other = Cart::load(dir.store());
    assert!(other.is_empty());
}

#[test]
fn corrupt_snapshot_on_disk_yields_empty_cart() {
    let dir = TempDir::new();
    dir.store()
        .set(CART_STORAGE_KEY, "not json at all")
        .expect("seed failed");

    let cart = Cart::load(dir.store());
    assert!(cart.is_empty());
    assert_eq!(cart.subtotal(), Decimal::ZERO);
}

#[test]
fn clear_removes_snapshot_contents() {
    let dir = TempDir::new();

    let mut cart = Cart::load(dir.store());
    cart.add_item(&product("p1", "Silk Scarf", "49.99"), 3)
        .expect("add failed");
    cart.clear().expect("clear failed");

    let cart = Cart::load(dir.store());
    assert!(cart.is_empty());
}

#[test]
fn pricing_is_derived_from_persisted_lines() {
    let dir = TempDir::new();

    {
        let mut cart = Cart::load(dir.store());
        // subtotal 99.98: below the free-shipping threshold
        cart.add_item(&product("p1", "Silk Scarf", "49.99"), 2)
            .expect("add failed");
    }

    let cart = Cart::load(dir.store());
    assert_eq!(cart.subtotal(), dec("99.98"));
    assert_eq!(cart.tax(), dec("7.9984"));
    assert_eq!(cart.shipping_fee(), dec("9.99"));
    assert_eq!(cart.total(), dec("117.9584"));
}
