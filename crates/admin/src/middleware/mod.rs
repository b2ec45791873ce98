//! Back-office middleware.
//!
//! Sessions, tracing, request ids and security headers are applied by the
//! storefront router the back office is mounted in; this crate only adds
//! the admin-role gate.

pub mod auth;

pub use auth::{AdminRejection, RequireAdmin};
