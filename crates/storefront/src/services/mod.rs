//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Mock login and signup (role assignment, session token)

pub mod auth;
