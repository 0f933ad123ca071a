//! Integration tests for storefront page rendering.
//!
//! These tests drive the full router (session, header and tracing layers
//! included) without binding a socket.

#![allow(clippy::unwrap_used)]

use threadline_integration_tests::TestContext;

// =============================================================================
// Health & Home
// =============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/health").await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_lists_new_arrivals_and_sale_items() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("New Arrivals"));
    assert!(resp.body.contains("Classic White T-Shirt"));
    assert!(resp.body.contains("On Sale"));
    assert!(resp.body.contains("Floral Summer Dress"));
    // Nothing viewed yet
    assert!(!resp.body.contains("Your Recently Viewed"));
}

#[tokio::test]
async fn test_reading_pages_does_not_start_a_session() {
    let mut ctx = TestContext::new();
    ctx.get("/").await;
    ctx.get("/category/women").await;

    assert!(!ctx.has_session());
}

// =============================================================================
// Product Pages
// =============================================================================

#[tokio::test]
async fn test_product_page_renders_options() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/product/2").await;

    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("Slim Fit Jeans"));
    assert!(resp.body.contains("$50.99"));
    assert!(resp.body.contains("$59.99"));
    assert!(resp.body.contains("You May Also Like"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut ctx = TestContext::new();

    let resp = ctx.get("/product/999").await;
    assert_eq!(resp.status, 404);
    assert!(resp.body.contains("Product Not Found"));

    let resp = ctx.get("/product/not-a-number").await;
    assert_eq!(resp.status, 404);
}

#[tokio::test]
async fn test_viewed_products_show_on_home_page() {
    let mut ctx = TestContext::new();

    // The sweater is neither new nor on sale, so it only shows up as viewed
    let before = ctx.get("/").await;
    assert!(!before.body.contains("Oversized Knit Sweater"));

    ctx.get("/product/3").await;
    assert!(ctx.has_session());

    let after = ctx.get("/").await;
    assert!(after.body.contains("Your Recently Viewed"));
    assert!(after.body.contains("Oversized Knit Sweater"));
}

// =============================================================================
// Category Pages
// =============================================================================

#[tokio::test]
async fn test_category_sorted_by_price_descending() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/category/men?sort=price-desc").await;

    assert_eq!(resp.status, 200);
    let sneakers = resp.body.find("Running Sneakers").unwrap();
    let shirt = resp.body.find("Cotton Dress Shirt").unwrap();
    let jeans = resp.body.find("Slim Fit Jeans").unwrap();
    assert!(sneakers < shirt);
    assert!(shirt < jeans);
    assert!(!resp.body.contains("Classic White T-Shirt"));
}

#[tokio::test]
async fn test_category_with_unknown_sort_uses_catalog_order() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/category/men?sort=popularity").await;

    assert_eq!(resp.status, 200);
    let jeans = resp.body.find("Slim Fit Jeans").unwrap();
    let sneakers = resp.body.find("Running Sneakers").unwrap();
    assert!(jeans < sneakers);
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/category/kids").await;

    assert_eq!(resp.status, 404);
    assert!(resp.body.contains("Category Not Found"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/no/such/page").await;

    assert_eq!(resp.status, 404);
    assert!(resp.body.contains("Page Not Found"));
}

// =============================================================================
// Response Headers
// =============================================================================

#[tokio::test]
async fn test_pages_carry_security_headers() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.header("x-frame-options"), Some("DENY"));
    assert_eq!(resp.header("x-content-type-options"), Some("nosniff"));
    assert!(
        resp.header("content-security-policy")
            .unwrap()
            .contains("https://images.unsplash.com")
    );
    assert_eq!(resp.header("cache-control"), Some("no-store, max-age=0"));
    assert!(resp.header("x-request-id").is_some());
}

#[tokio::test]
async fn test_static_assets_are_cacheable() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/static/css/main.css").await;

    assert_eq!(resp.status, 200);
    assert_ne!(resp.header("cache-control"), Some("no-store, max-age=0"));
}
