//! Core types for Luxe.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod product;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use product::Product;
pub use status::*;
