//! Luxe Core - Shared types library.
//!
//! This crate provides common types used across all Luxe components:
//! - `storefront` - Cart/pricing engine, catalog queries, checkout
//! - `admin` - Admin session gate and back-office management
//! - `cli` - Command-line tools for privileged platform operations
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no platform access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, money, and statuses
//! - [`storage`] - The durable key-value store trait client state lives behind

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod storage;
pub mod types;

pub use storage::{KeyValueStore, StorageError};
pub use types::*;
