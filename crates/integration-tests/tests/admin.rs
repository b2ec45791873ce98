//! Back-office access and manager flows through the real login.

#![allow(clippy::unwrap_used)]

use botanical_integration_tests::{TestApp, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_anonymous_visitor_is_sent_to_login() {
    let app = TestApp::spawn().await;
    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=login_required");
}

#[tokio::test]
async fn test_regular_user_is_kept_out() {
    let app = TestApp::spawn().await;
    let response = app.login("shopper@example.com").await;
    assert!(location(&response).starts_with('/'));
    assert!(!location(&response).starts_with("/admin"));

    let response = app.get("/admin/orders").await;
    assert_eq!(location(&response), "/login?error=login_required");
}

#[tokio::test]
async fn test_admin_lands_on_dashboard() {
    let app = TestApp::spawn().await;
    let response = app.login("admin@example.com").await;
    assert!(location(&response).starts_with("/admin"));

    let response = app.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("$15,680"));
    assert!(body.contains("Recent Orders"));
}

#[tokio::test]
async fn test_users_list_search_and_page_size() {
    let app = TestApp::spawn().await;
    app.login("admin@example.com").await;

    let body = app
        .get("/admin/users?q=smith")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Jane Smith"));
    assert!(!body.contains("John Doe"));

    let body = app
        .get("/admin/users?per_page=10")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Showing 1 to 8 of 8 users"));
}

#[tokio::test]
async fn test_order_status_update_round_trip() {
    let app = TestApp::spawn().await;
    app.login("admin@example.com").await;

    let response = app
        .post_form(
            "/admin/orders/4/status",
            &[("status", "processing"), ("return_to", "/admin/orders/4")],
        )
        .await;
    assert_eq!(
        location(&response),
        "/admin/orders/4?success=order_status_updated&item=ORD-2023-004&new_status=processing"
    );

    let body = app
        .get(location(&response))
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Order #ORD-2023-004 status updated to processing"));
}

#[tokio::test]
async fn test_settings_reject_bad_tax_rate() {
    let app = TestApp::spawn().await;
    app.login("admin@example.com").await;

    let response = app
        .post_form(
            "/admin/settings/general",
            &[
                ("store_name", "Botanical Store"),
                ("currency", "USD"),
                ("tax_rate", "150"),
            ],
        )
        .await;
    assert_eq!(
        location(&response),
        "/admin/settings?tab=general&error=invalid_tax_rate"
    );
}
