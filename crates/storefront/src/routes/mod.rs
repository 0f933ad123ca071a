//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /product/{id}           - Product detail (records recently viewed)
//! GET  /category/{category}    - Category listing, ?sort=default|price-asc|price-desc
//!
//! # Cart
//! GET  /cart                   - Cart page with order summary
//! POST /cart/add               - Add to cart
//! POST /cart/update            - Set a line's quantity (zero or less removes)
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! GET  /checkout               - Shipping and payment form
//! POST /checkout               - Place order
//!
//! # Wishlist
//! GET  /wishlist               - Wishlist page
//! POST /wishlist/add           - Save a product
//! POST /wishlist/remove        - Drop a product
//!
//! # Newsletter
//! POST /newsletter             - Subscribe
//! ```
//!
//! Every POST answers with a 303 redirect, either to the form's `return_to`
//! path or to the page that owns the form.

pub mod cart;
pub mod categories;
pub mod checkout;
pub mod home;
pub mod newsletter;
pub mod pages;
pub mod products;
pub mod wishlist;

use std::fmt::Display;
use std::str::FromStr;

use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, de};

use crate::state::AppState;

/// Longest `return_to` path accepted.
const MAX_RETURN_PATH_LEN: usize = 512;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/product/{id}", get(products::show))
        .route("/category/{category}", get(categories::show))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::place_order))
        .nest("/wishlist", wishlist_routes())
        .route("/newsletter", post(newsletter::subscribe))
}

/// Resolve a form's `return_to` to a same-site path.
///
/// Only absolute paths on this host are honored. Anything else (a full URL,
/// a protocol-relative `//host`, backslashes or control characters) falls
/// back to `fallback`.
#[must_use]
pub fn safe_return_path(return_to: Option<&str>, fallback: &str) -> String {
    return_to
        .map(str::trim)
        .filter(|path| is_local_path(path))
        .unwrap_or(fallback)
        .to_string()
}

/// Deserialize an optional form field, treating a blank value as absent.
///
/// Browsers submit a cleared number input as `quantity=`.
///
/// # Errors
///
/// Returns an error if a non-blank value does not parse as `T`.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && path.len() <= MAX_RETURN_PATH_LEN
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
