//! Luxe Storefront - the shopper-facing engine.
//!
//! Three concerns live here:
//!
//! - [`cart`] - the in-session cart: one line per product, quantities,
//!   snapshot persistence, and change notification
//! - [`pricing`] - derived monetary figures (subtotal, 8% tax, flat
//!   shipping, grand total) in exact decimal arithmetic
//! - [`catalog`] - product listing/lookup against the platform, cached
//! - [`checkout`] - order submission to the platform
//!
//! The cart and pricing code is synchronous and touches nothing but the
//! local key-value store; catalog and checkout are thin async
//! pass-throughs over [`luxe_platform`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod pricing;

pub use cart::{CART_STORAGE_KEY, Cart, CartError, CartEvent, CartLine};
pub use catalog::{Catalog, CatalogError, Category, Product, ProductFilter, ProductSort};
pub use checkout::{CheckoutError, OrderDraft, submit_order};
