//! Botanical Store back office.
//!
//! Dashboard, products, orders, users, and store settings over in-memory
//! mock tables. The storefront binary mounts [`router`] under `/admin`;
//! every page requires a signed-in admin session.
//!
//! ```ignore
//! let admin = botanical_admin::router(AdminState::new(AdminConfig::default()));
//! let app = Router::new().nest("/admin", admin);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod error;
pub mod filters;
pub mod messages;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::router;
pub use state::{AdminConfig, AdminState};
pub use store::{BackOffice, BackOfficeError};
