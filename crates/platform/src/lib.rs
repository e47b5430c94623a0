//! Luxe Platform - client for the hosted backend platform.
//!
//! Everything "hard" in Luxe (credential verification, relational data,
//! file storage) is delegated to a hosted backend-as-a-service platform.
//! This crate is the only place that talks to it:
//!
//! - [`auth`] - password sign-in and privileged user lookup
//! - [`rest`] - table reads and writes over the platform's REST surface
//! - [`storage`] - object storage uploads and public URLs
//! - [`local_store`] - [`luxe_core::KeyValueStore`] implementations for
//!   client-local durable state (cart snapshot, admin session record)
//!
//! The client is cheap to clone (`Arc` inner, per the usual reqwest
//! pattern) and authenticates with either the public anon key or the
//! privileged service key; privileged calls fail fast when no service key
//! is configured.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
mod client;
pub mod config;
mod error;
pub mod local_store;
pub mod rest;
pub mod storage;

pub use client::PlatformClient;
pub use config::{ConfigError, PlatformConfig};
pub use error::PlatformError;
pub use local_store::{LocalStore, MemoryStore};
