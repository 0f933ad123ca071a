//! Integration tests for the cart and wishlist forms.

use serde_json::json;
use threadline_core::{Catalog, ProductId};
use threadline_integration_tests::TestContext;

const ADD_TEE: &str = "product_id=1&quantity=1&size=M&color=%23FFFFFF&return_to=%2Fproduct%2F1";
const ADD_BAG: &str = "product_id=4&color=%23000000";

fn product_name(id: u32) -> String {
    let catalog = Catalog::builtin().expect("built-in catalog should load");
    catalog
        .get(ProductId::new(id))
        .map(|product| product.name.clone())
        .expect("product should be in the catalog")
}

/// Markup of a cart line's remove button, present once per line.
fn cart_line(name: &str) -> String {
    format!(r#"aria-label="Remove {name}""#)
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_empty_cart_page() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/cart").await;

    assert_eq!(resp.status, 200);
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_to_cart_redirects_and_shows_line() {
    let mut ctx = TestContext::new();
    let tee = product_name(1);

    let resp = ctx.post_form("/cart/add", ADD_TEE).await;
    assert_eq!(resp.status, 303);
    assert_eq!(resp.location(), Some("/product/1"));
    assert!(ctx.has_session());

    let cart = ctx.get("/cart").await;
    assert_eq!(cart.status, 200);
    assert!(cart.body.contains(&cart_line(&tee)));
    assert!(cart.body.contains("Added to cart"));

    // Notices are shown once
    let again = ctx.get("/cart").await;
    assert!(!again.body.contains("Added to cart"));
}

#[tokio::test]
async fn test_cart_summary_leaves_tax_for_checkout() {
    let mut ctx = TestContext::new();
    ctx.post_form("/cart/add", ADD_TEE).await;
    let cart = ctx.get("/cart").await;

    assert!(cart.body.contains("Calculated at checkout"));
    assert!(cart.body.contains("$29.99"));
    // 8% tax is only added on the checkout page
    assert!(!cart.body.contains("$2.40"));
    assert!(!cart.body.contains("$32.39"));
}

#[tokio::test]
async fn test_adding_same_line_twice_updates_quantity() {
    let mut ctx = TestContext::new();
    ctx.post_form("/cart/add", ADD_TEE).await;
    ctx.post_form("/cart/add", ADD_TEE).await;

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains("Cart updated"));
    assert!(cart.body.contains("$59.98"));
    assert!(cart.body.contains(r#"<span class="badge">2</span>"#));
}

#[tokio::test]
async fn test_blank_quantity_adds_one_unit() {
    let mut ctx = TestContext::new();

    let resp = ctx
        .post_form("/cart/add", "product_id=4&quantity=&color=%23000000")
        .await;
    assert_eq!(resp.status, 303);
    assert_eq!(resp.location(), Some("/product/4"));

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains(&cart_line(&product_name(4))));
    assert!(cart.body.contains(r#"<span class="badge">1</span>"#));
}

#[tokio::test]
async fn test_blank_update_quantity_leaves_line_alone() {
    let mut ctx = TestContext::new();
    ctx.submit("/cart/add", ADD_BAG).await;

    let resp = ctx
        .post_form("/cart/update", "product_id=4&size=&color=%23000000&quantity=")
        .await;
    assert_eq!(resp.status, 303);
    assert_eq!(resp.location(), Some("/cart"));

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains(&cart_line(&product_name(4))));
    assert!(cart.body.contains(r#"<span class="badge">1</span>"#));
}

#[tokio::test]
async fn test_add_without_size_is_rejected() {
    let mut ctx = TestContext::new();

    let resp = ctx
        .post_form("/cart/add", "product_id=1&color=%23FFFFFF")
        .await;
    assert_eq!(resp.status, 303);
    assert_eq!(resp.location(), Some("/product/1"));

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
    assert!(cart.body.contains("Please select a size"));
}

#[tokio::test]
async fn test_add_unknown_product_leaves_cart_empty() {
    let mut ctx = TestContext::new();
    ctx.post_form("/cart/add", "product_id=999&return_to=%2F").await;

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_foreign_return_path_is_ignored() {
    let mut ctx = TestContext::new();
    let resp = ctx
        .post_form(
            "/cart/add",
            "product_id=4&color=%23000000&return_to=https%3A%2F%2Fevil.example.com%2F",
        )
        .await;

    assert_eq!(resp.status, 303);
    assert_eq!(resp.location(), Some("/product/4"));
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut ctx = TestContext::new();
    ctx.submit("/cart/add", ADD_TEE).await;

    let resp = ctx
        .post_form("/cart/update", "product_id=1&size=M&color=%23FFFFFF&quantity=0")
        .await;
    assert_eq!(resp.status, 303);
    assert_eq!(resp.location(), Some("/cart"));

    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_remove_and_clear() {
    let mut ctx = TestContext::new();
    let tee = product_name(1);
    let bag = product_name(4);
    ctx.submit("/cart/add", ADD_TEE).await;
    ctx.submit("/cart/add", ADD_BAG).await;

    let cart = ctx
        .submit("/cart/remove", "product_id=1&size=M&color=%23FFFFFF")
        .await;
    assert_eq!(cart.status, 200);
    assert!(cart.body.contains("Removed from cart"));
    assert!(!cart.body.contains(&cart_line(&tee)));
    assert!(cart.body.contains(&cart_line(&bag)));

    let cart = ctx.submit("/cart/clear", "").await;
    assert!(cart.body.contains("Cart cleared"));
    assert!(cart.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_malformed_stored_cart_reads_as_empty() {
    let mut ctx = TestContext::new();
    ctx.submit("/cart/add", ADD_TEE).await;

    ctx.set_session_value("cart", json!({ "items": "not a list" }))
        .await;
    let cart = ctx.get("/cart").await;
    assert_eq!(cart.status, 200);
    assert!(cart.body.contains("Your cart is empty"));

    // The next add overwrites the bad value
    ctx.submit("/cart/add", ADD_BAG).await;
    let cart = ctx.get("/cart").await;
    assert!(cart.body.contains(&cart_line(&product_name(4))));
}

#[tokio::test]
async fn test_malformed_stored_wishlist_reads_as_empty() {
    let mut ctx = TestContext::new();
    ctx.submit("/wishlist/add", "product_id=4").await;

    ctx.set_session_value("wishlist", json!(42)).await;
    let wishlist = ctx.get("/wishlist").await;
    assert_eq!(wishlist.status, 200);
    assert!(wishlist.body.contains("Your wishlist is empty"));
}

#[tokio::test]
async fn test_sessions_are_per_visitor() {
    let mut alice = TestContext::new();
    alice.post_form("/cart/add", ADD_TEE).await;

    let mut bob = TestContext::new();
    let cart = bob.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty"));
}

// =============================================================================
// Wishlist
// =============================================================================

#[tokio::test]
async fn test_wishlist_add_and_remove() {
    let mut ctx = TestContext::new();
    let bag = product_name(4);

    let resp = ctx
        .post_form("/wishlist/add", "product_id=4&return_to=%2Fcategory%2Faccessories")
        .await;
    assert_eq!(resp.status, 303);
    assert_eq!(resp.location(), Some("/category/accessories"));

    let wishlist = ctx.get("/wishlist").await;
    assert!(wishlist.body.contains(&bag));
    assert!(wishlist.body.contains("Item Added to Wishlist"));

    let resp = ctx.post_form("/wishlist/remove", "product_id=4").await;
    assert_eq!(resp.location(), Some("/wishlist"));

    let wishlist = ctx.get("/wishlist").await;
    assert!(wishlist.body.contains("Your wishlist is empty"));
}

#[tokio::test]
async fn test_wishlist_duplicate_warns() {
    let mut ctx = TestContext::new();
    ctx.submit("/wishlist/add", "product_id=4").await;
    let wishlist = ctx.submit("/wishlist/add", "product_id=4").await;

    assert!(wishlist.body.contains("notice--warning"));
    assert!(wishlist.body.contains(r#"<span class="badge">1</span>"#));
}
