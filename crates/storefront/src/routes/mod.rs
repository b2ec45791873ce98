//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Store
//! GET  /store                  - Product grid (search, filters, sort, pages)
//! GET  /store/product/{id}     - Product detail (variants, care guide, reviews)
//! POST /store/product/{id}/reviews - Mock review submission
//!
//! # Static pages and forms
//! GET  /about | /faq
//! GET  /contact, POST /contact - Mock contact form
//! POST /newsletter             - Mock newsletter signup
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add product (quantity optional)
//! POST /cart/update            - Update quantity
//! POST /cart/remove            - Remove line
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/checkout          - Empty cart -> error, else /checkout
//! GET  /checkout               - Checkout summary
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/add | /wishlist/remove | /wishlist/toggle | /wishlist/clear
//!
//! # Auth
//! GET  /login, POST /login
//! GET  /signup, POST /signup
//! POST /logout
//!
//! # Profile (requires auth)
//! GET  /profile                - Overview
//! GET  /profile/orders         - Order history
//! GET  /profile/wishlist       - Wishlist
//! GET  /profile/payment-methods, POST .../{id}/default, POST .../{id}/delete
//! GET  /profile/addresses, POST .../{id}/default, POST .../{id}/delete
//! GET  /profile/settings, POST /profile/settings/preferences, POST /profile/settings/password
//!
//! # Back office
//! /admin/...                   - Mounted from `botanical_admin`
//!
//! *                            - 404 page
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod pages;
pub mod products;
pub mod profile;
pub mod store;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};
use botanical_core::SessionUser;
use tower_sessions::Session;

use crate::client_state::{self, Badges};
use crate::error::Result;
use crate::messages::{Message, MessageQuery};
use crate::state::AppState;

/// Data every page template needs: navbar state and the one-shot message.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user: Option<SessionUser>,
    pub badges: Badges,
    pub message: Option<Message>,
}

impl PageContext {
    /// Build the page context for a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub async fn load(
        session: &Session,
        user: Option<SessionUser>,
        query: &MessageQuery,
    ) -> Result<Self> {
        Ok(Self {
            user,
            badges: client_state::load_badges(session).await?,
            message: query.message(),
        })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(SessionUser::is_admin)
    }
}

/// Create the store routes router.
pub fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(store::index))
        .route("/product/{id}", get(products::show))
        .route("/product/{id}/reviews", post(products::submit_review))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::begin_checkout))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/toggle", post(wishlist::toggle))
        .route("/clear", post(wishlist::clear))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/logout", post(auth::logout))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::overview))
        .route("/orders", get(profile::orders))
        .route("/wishlist", get(profile::wishlist))
        .route("/payment-methods", get(profile::payment_methods))
        .route(
            "/payment-methods/{id}/default",
            post(profile::set_default_payment_method),
        )
        .route(
            "/payment-methods/{id}/delete",
            post(profile::delete_payment_method),
        )
        .route("/addresses", get(profile::addresses))
        .route("/addresses/{id}/default", post(profile::set_default_address))
        .route("/addresses/{id}/delete", post(profile::delete_address))
        .route("/settings", get(profile::settings))
        .route("/settings/preferences", post(profile::toggle_preference))
        .route("/settings/password", post(profile::change_password))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/store", store_routes())
        .route("/about", get(pages::about))
        .route("/faq", get(pages::faq))
        .route("/contact", get(pages::contact).post(pages::submit_contact))
        .route("/newsletter", post(pages::subscribe))
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
        .nest("/wishlist", wishlist_routes())
        .merge(auth_routes())
        .nest("/profile", profile_routes())
        .fallback(pages::not_found)
}
