//! Threadline Core - storefront domain library.
//!
//! This crate holds the product catalog and the per-visitor state types the
//! storefront persists between requests:
//! - [`catalog`] - The static product catalog and its queries
//! - [`cart`] - Cart lines merged by product, size and color
//! - [`wishlist`] - Saved products, unique by id
//! - [`recently_viewed`] - The last five product pages a visitor opened
//! - [`checkout`] - Shipping details validation and order totals
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no sessions, no HTTP. Storage and rendering live in the storefront crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod recently_viewed;
pub mod types;
pub mod wishlist;

pub use cart::{AddOutcome, Cart, CartItem, LineKey};
pub use catalog::{
    Catalog, CatalogError, Category, Product, Selection, SelectionError, SortOrder, UnknownCategory,
};
pub use checkout::{
    OrderLine, OrderSummary, PaymentMethod, ShippingDetails, UnknownPaymentMethod, ValidationError,
};
pub use recently_viewed::RecentlyViewed;
pub use types::*;
pub use wishlist::{Wishlist, WishlistOutcome};
