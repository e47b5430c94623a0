//! Integration tests for Luxe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p luxe-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - cart snapshot round trips over the on-disk
//!   key-value store
//! - `admin_session_flow` - login, session window, and gate behavior
//! - `platform_live` - smoke tests against a real platform deployment
//!
//! The live tests are `#[ignore]`d by default; run them with
//! `cargo test -p luxe-integration-tests -- --ignored` after exporting:
//!
//! - `LUXE_PLATFORM_URL`
//! - `LUXE_PLATFORM_ANON_KEY`
//! - `LUXE_PLATFORM_SERVICE_KEY` (privileged smoke tests only)

#![cfg_attr(not(test), forbid(unsafe_code))]
