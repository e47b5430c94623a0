//! Luxe Admin - the back-office side of the store.
//!
//! - [`session`] - the client-cached admin session gate: a time-limited,
//!   advisory assertion that the current user may see admin views
//! - [`auth`] - the admin login flow: credential verification plus role
//!   lookup, both delegated to the platform
//! - [`signup`] - admin self-registration: account creation plus the
//!   self-assigned role row
//! - [`products`], [`orders`] - thin pass-through management over the
//!   platform's tables
//!
//! The gate is not a security boundary. It only decides whether admin UI
//! renders; every privileged mutation is re-authorized by the platform's
//! own access rules when it executes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod orders;
pub mod products;
pub mod session;
pub mod signup;

pub use auth::{AuthService, AuthServiceError, LoginError, PlatformAuth, login};
pub use signup::{RegistrationError, Registrar, SignUpServiceError, register};
pub use session::{
    AccessState, AdminSession, SESSION_STORAGE_KEY, SessionError, SessionGate,
};
