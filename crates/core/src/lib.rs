//! Botanical Store Core - shared domain types and state containers.
//!
//! This crate is used by every Botanical Store component:
//! - `storefront` - Public shop (catalog, cart, wishlist, profile)
//! - `admin` - Back office mounted under `/admin`
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP, no session access. Handlers load a container from the session,
//! apply an operation, and write it back.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, and status enums
//! - [`cart`] - Cart container (merge-by-id line items, derived totals)
//! - [`wishlist`] - Wishlist container (idempotent set, JSON persistence)
//! - [`account`] - Saved addresses, payment methods, and preferences
//! - [`session`] - Session user model and session keys
//! - [`listing`] - Search, sort direction, and page-slice pagination helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod listing;
pub mod session;
pub mod types;
pub mod wishlist;

pub use account::{AccountBook, AccountError, Address, PaymentMethod, Preference, Preferences};
pub use cart::{Cart, CartItem, CartTotals, FLAT_SHIPPING_CENTS};
pub use listing::{Page, SortDirection, TemplateArg, matches_query};
pub use session::{Role, SessionUser};
pub use types::*;
pub use wishlist::{RestoredWishlist, Wishlist, WishlistItem};
