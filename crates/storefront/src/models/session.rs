//! Session storage layout.
//!
//! Each visitor's session is a key-value map of JSON values. The cart,
//! wishlist and recently-viewed keys keep the names the storefront has
//! always used, so a stored blob reads the same wherever it is inspected.
//! Values carry no schema version; the last write wins.

/// Session keys.
pub mod keys {
    /// Cart lines (`[CartItem]`).
    pub const CART: &str = "cart";

    /// Saved products (`[Product]`).
    pub const WISHLIST: &str = "wishlist";

    /// Product ids, most recent first (`[u32]`, at most five).
    pub const RECENTLY_VIEWED: &str = "recentlyViewed";

    /// Reserved for a sign-in flag. The storefront has no sign-in and never
    /// writes it.
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";

    /// Reserved for the signed-in user. Never written, like
    /// [`IS_AUTHENTICATED`].
    pub const USER: &str = "user";

    /// Notices waiting to be shown on the next rendered page.
    pub const NOTICES: &str = "notices";

    /// Shipping details the shopper asked to remember at checkout.
    pub const SAVED_SHIPPING: &str = "savedShipping";
}
