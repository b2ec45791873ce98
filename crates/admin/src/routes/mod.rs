//! HTTP route handlers for the back office.
//!
//! Mounted by the storefront under `/admin`; every handler requires a
//! signed-in admin (see [`RequireAdmin`](crate::middleware::RequireAdmin)).
//!
//! # Route Structure
//!
//! ```text
//! GET  /, /dashboard           - Dashboard
//!
//! # Products
//! GET  /products               - Products manager (search, category, sort, pages)
//! GET  /products/new, POST /products
//! GET  /products/{id}/edit, POST /products/{id}
//! POST /products/{id}/delete
//!
//! # Orders
//! GET  /orders                 - Orders manager (search, status, sort, page size)
//! GET  /orders/{id}            - Order detail
//! POST /orders/{id}/status     - Single status update
//! POST /orders/bulk-status     - Bulk status update (repeated order_id)
//!
//! # Users
//! GET  /users                  - Users manager (search, role, status, sort, page size)
//! GET  /users/{id}/edit, POST /users/{id}
//! POST /users/{id}/delete
//!
//! # Settings
//! GET  /settings?tab=general|shipping|payment
//! POST /settings/general
//! POST /settings/shipping, POST /settings/shipping/{id}, POST /settings/shipping/{id}/delete
//! POST /settings/payment, POST /settings/payment/{id}
//! POST /settings/payment/{id}/toggle, POST /settings/payment/{id}/delete
//!
//! *                            - Dashboard
//! ```

pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use botanical_core::{SessionUser, TemplateArg};

use crate::messages::{Message, MessageQuery};
use crate::state::AdminState;

/// Sidebar entry of the page being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Products,
    Orders,
    Users,
    Settings,
}

impl Section {
    pub const ALL: [Self; 5] = [
        Self::Dashboard,
        Self::Products,
        Self::Orders,
        Self::Users,
        Self::Settings,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Orders => "Orders",
            Self::Users => "Users",
            Self::Settings => "Settings",
        }
    }

    #[must_use]
    pub const fn href(&self) -> &'static str {
        match self {
            Self::Dashboard => "/admin",
            Self::Products => "/admin/products",
            Self::Orders => "/admin/orders",
            Self::Users => "/admin/users",
            Self::Settings => "/admin/settings",
        }
    }
}

/// Data every back-office page renders in its layout.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub admin: SessionUser,
    pub section: Section,
    pub message: Option<Message>,
}

impl AdminContext {
    #[must_use]
    pub fn new(admin: SessionUser, section: Section, query: &MessageQuery) -> Self {
        Self {
            admin,
            section,
            message: query.message(),
        }
    }

    #[must_use]
    pub fn is_section(&self, section: impl TemplateArg<Section>) -> bool {
        self.section == section.resolve()
    }

    #[must_use]
    pub const fn sections(&self) -> [Section; 5] {
        Section::ALL
    }
}

/// Build the back-office router.
///
/// The router carries its own state so it can be nested into a router with
/// any state type.
pub fn router<S>(state: AdminState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(dashboard::index))
        .route("/dashboard", get(dashboard::index))
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
        .nest("/settings", settings_routes())
        .fallback(dashboard::index)
        .with_state(state)
}

fn product_routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new))
        .route("/{id}", post(products::update))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}/delete", post(products::delete))
}

fn order_routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/bulk-status", post(orders::bulk_status))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::update_status))
}

fn user_routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(users::index))
        .route("/{id}", post(users::update))
        .route("/{id}/edit", get(users::edit))
        .route("/{id}/delete", post(users::delete))
}

fn settings_routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(settings::index))
        .route("/general", post(settings::update_general))
        .route("/shipping", post(settings::add_shipping_method))
        .route("/shipping/{id}", post(settings::update_shipping_method))
        .route("/shipping/{id}/delete", post(settings::delete_shipping_method))
        .route("/payment", post(settings::add_payment_gateway))
        .route("/payment/{id}", post(settings::update_payment_gateway))
        .route("/payment/{id}/toggle", post(settings::toggle_payment_gateway))
        .route("/payment/{id}/delete", post(settings::delete_payment_gateway))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use botanical_core::{Email, Role, UserId, session::keys};
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, Session, SessionManagerLayer};

    use super::*;
    use crate::middleware::auth::LOGIN_PATH;
    use crate::state::AdminConfig;

    async fn sign_in(session: Session) -> StatusCode {
        let admin = SessionUser {
            id: UserId::new(2),
            email: Email::parse("admin@example.com").unwrap(),
            role: Role::Admin,
            name: "Admin User".to_string(),
            avatar: String::new(),
        };
        session.insert(keys::TOKEN, "mock-token").await.unwrap();
        session.insert(keys::CURRENT_USER, admin).await.unwrap();
        StatusCode::NO_CONTENT
    }

    fn app() -> Router {
        Router::new()
            .route("/sign-in", post(sign_in))
            .nest("/admin", router(AdminState::new(AdminConfig::default())))
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn signed_in_cookie(app: &Router) -> String {
        let response = send(
            app,
            Request::post("/sign-in").body(Body::empty()).unwrap(),
        )
        .await;
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        cookie.split(';').next().unwrap().to_string()
    }

    fn get(uri: &str, cookie: &str) -> Request<Body> {
        Request::get(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn post_form(uri: &str, cookie: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_anonymous_visitor_is_sent_to_login() {
        let app = app();
        let response = send(&app, Request::get("/admin/orders").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_orders_list_filters_by_status() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, get("/admin/orders?status=delivered", &cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_text(response).await;
        assert!(body.contains("ORD-2023-001"));
        assert!(!body.contains("ORD-2023-002"));
    }

    #[tokio::test]
    async fn test_bulk_status_reports_count() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            post_form(
                "/admin/orders/bulk-status",
                &cookie,
                "order_id=1&order_id=2&status=shipped&return_to=%2Fadmin%2Forders",
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/admin/orders?success=orders_bulk_updated&count=2&new_status=shipped"
        );

        let response = send(&app, get("/admin/orders?status=shipped", &cookie)).await;
        let body = body_text(response).await;
        assert!(body.contains("ORD-2023-001"));
        assert!(body.contains("ORD-2023-002"));
    }

    #[tokio::test]
    async fn test_bulk_status_without_selection() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            post_form("/admin/orders/bulk-status", &cookie, "status=shipped"),
        )
        .await;
        assert_eq!(location(&response), "/admin/orders?error=no_orders_selected");
    }

    #[tokio::test]
    async fn test_invalid_product_form_is_shown_again() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(
            &app,
            post_form("/admin/products", &cookie, "name=&category=Pots&price=5"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("Product name is required"));
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, get("/admin/products/999/edit", &cookie)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_gateway_toggle_names_the_gateway() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, post_form("/admin/settings/payment/1/toggle", &cookie, "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/admin/settings?tab=payment&success=gateway_"));
    }

    #[tokio::test]
    async fn test_list_pages_render_sort_and_page_controls() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        for uri in [
            "/admin/orders?sort=total&dir=desc&per_page=25",
            "/admin/users?sort=name&role=admin",
            "/admin/products?sort=price",
            "/admin/settings?tab=payment",
        ] {
            let response = send(&app, get(uri, &cookie)).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_admin_path_shows_dashboard() {
        let app = app();
        let cookie = signed_in_cookie(&app).await;
        let response = send(&app, get("/admin/nowhere", &cookie)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Sales Overview"));
    }
}
