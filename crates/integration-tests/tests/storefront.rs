//! Storefront flows: cart, wishlist, and the not-found page.

#![allow(clippy::unwrap_used)]

use botanical_integration_tests::{TestApp, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let app = TestApp::spawn().await;
    let response = app
        .client
        .get(app.url("/health"))
        .header("x-request-id", "edge-1234")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "edge-1234");

    let generated = app.get("/health").await;
    assert_eq!(generated.headers()["x-request-id"].len(), 36);
}

#[tokio::test]
async fn test_cart_add_then_count() {
    let app = TestApp::spawn().await;

    let response = app.post_form("/cart/add", &[("product_id", "2")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/cart?success=cart_added"));

    app.post_form("/cart/add", &[("product_id", "2")]).await;
    let badge = app.get("/cart/count").await.text().await.unwrap();
    assert!(badge.contains(">2<"), "unexpected badge: {badge}");

    let cart = app.get("/cart").await.text().await.unwrap();
    assert!(cart.contains("Snake Plant"));
}

#[tokio::test]
async fn test_cart_add_ignores_offsite_return_to() {
    let app = TestApp::spawn().await;
    for target in ["/\\evil.example", "//evil.example", "/%5Cevil.example"] {
        let response = app
            .post_form("/cart/add", &[("product_id", "2"), ("return_to", target)])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(
            location(&response).starts_with("/cart?success=cart_added"),
            "{target} escaped: {}",
            location(&response)
        );
    }
}

#[tokio::test]
async fn test_cart_rejects_zero_quantity() {
    let app = TestApp::spawn().await;
    app.post_form("/cart/add", &[("product_id", "1")]).await;

    let response = app
        .post_form("/cart/update", &[("product_id", "1"), ("quantity", "0")])
        .await;
    assert_eq!(location(&response), "/cart?error=quantity_min");

    let badge = app.get("/cart/count").await.text().await.unwrap();
    assert!(badge.contains(">1<"));
}

#[tokio::test]
async fn test_empty_cart_cannot_check_out() {
    let app = TestApp::spawn().await;
    let response = app.post_form("/cart/checkout", &[]).await;
    assert_eq!(location(&response), "/cart?error=cart_empty");
}

#[tokio::test]
async fn test_wishlist_toggle_adds_and_removes() {
    let app = TestApp::spawn().await;

    let response = app.post_form("/wishlist/toggle", &[("product_id", "1")]).await;
    assert!(location(&response).contains("success=wishlist_added"));
    let page = app.get("/wishlist").await.text().await.unwrap();
    assert!(page.contains("Monstera Deliciosa"));

    let response = app.post_form("/wishlist/toggle", &[("product_id", "1")]).await;
    assert!(location(&response).contains("success=wishlist_removed"));
}

#[tokio::test]
async fn test_unknown_page_renders_not_found() {
    let app = TestApp::spawn().await;
    let response = app.get("/no-such-page").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Page Not Found"));
}
