//! One-shot notices shown at the top of the next rendered page.
//!
//! A handler queues a notice after a cart or wishlist change, then redirects;
//! the page the browser lands on drains the queue and renders it once.

use serde::{Deserialize, Serialize};
use threadline_core::{AddOutcome, SelectionError, ValidationError, WishlistOutcome};

/// Visual treatment of a notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
    Warning,
}

impl NoticeVariant {
    /// CSS modifier class.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Default => "notice",
            Self::Destructive => "notice notice--destructive",
            Self::Warning => "notice notice--warning",
        }
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub variant: NoticeVariant,
}

impl Notice {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            variant: NoticeVariant::Default,
        }
    }

    /// A notice with a title only.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: NoticeVariant::Default,
        }
    }

    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.variant = NoticeVariant::Destructive;
        self
    }

    #[must_use]
    pub const fn warning(mut self) -> Self {
        self.variant = NoticeVariant::Warning;
        self
    }

    /// Notice for a cart addition.
    #[must_use]
    pub fn cart_add(outcome: AddOutcome, product_name: &str) -> Self {
        match outcome {
            AddOutcome::Added => Self::new(
                "Added to cart",
                format!("{product_name} has been added to your cart."),
            ),
            AddOutcome::QuantityUpdated => Self::new(
                "Cart updated",
                format!("Quantity updated for {product_name}."),
            ),
        }
    }

    #[must_use]
    pub fn cart_removed() -> Self {
        Self::new("Removed from cart", "Item has been removed from your cart.")
    }

    #[must_use]
    pub fn cart_cleared() -> Self {
        Self::new(
            "Cart cleared",
            "All items have been removed from your cart.",
        )
    }

    /// Notice for a wishlist addition.
    #[must_use]
    pub fn wishlist_add(outcome: WishlistOutcome, product_name: &str) -> Self {
        match outcome {
            WishlistOutcome::Added => Self::new(
                "Item Added to Wishlist",
                format!("{product_name} has been added to your wishlist."),
            ),
            WishlistOutcome::AlreadyPresent => Self::new(
                "Item Already in Wishlist",
                format!("{product_name} is already in your wishlist."),
            )
            .warning(),
        }
    }

    #[must_use]
    pub fn wishlist_removed() -> Self {
        Self::new(
            "Item Removed from Wishlist",
            "The item has been removed from your wishlist.",
        )
    }

    /// Notice for a size or color choice the product can't take.
    #[must_use]
    pub fn selection(error: &SelectionError) -> Self {
        match error {
            SelectionError::MissingSize | SelectionError::MissingColor => {
                Self::titled(error.to_string()).destructive()
            }
            SelectionError::UnknownSize(_) | SelectionError::UnknownColor(_) => {
                Self::new("Option unavailable", error.to_string()).destructive()
            }
        }
    }

    /// Notice for a rejected checkout form.
    #[must_use]
    pub fn checkout_invalid(error: &ValidationError) -> Self {
        let description = match error {
            ValidationError::MissingInformation(_) => {
                "Please fill in all required fields.".to_string()
            }
            ValidationError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
        };
        Self::new("Missing information", description).destructive()
    }

    #[must_use]
    pub fn order_placed() -> Self {
        Self::new("Order placed successfully!", "Thank you for your purchase.")
    }

    #[must_use]
    pub fn subscribed() -> Self {
        Self::new("Thank you!", "You've been subscribed to our newsletter.")
    }

    /// Notice for a newsletter form that can't be accepted.
    #[must_use]
    pub fn newsletter_error(description: impl Into<String>) -> Self {
        Self::new("Error", description).destructive()
    }

    /// Notice for a form naming a product that isn't in the catalog.
    #[must_use]
    pub fn unknown_product() -> Self {
        Self::new("Product not found", "That product is no longer available.").destructive()
    }
}

/// The queue of notices stored under [`super::session_keys::NOTICES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notices(pub Vec<Notice>);
