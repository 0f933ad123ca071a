//! Shopping cart state.
//!
//! A cart is an ordered list of lines. Two lines never share a [`LineKey`]:
//! adding a product in a size and color already in the cart bumps that line's
//! quantity instead of appending a second line.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Selection};
use crate::types::{Price, ProductId};

/// One line of the cart: a product snapshot plus the shopper's choices.
///
/// The product is flattened so the stored JSON reads as the product's own
/// fields followed by `quantity`, `size` and `color`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CartItem {
    #[must_use]
    pub fn new(product: Product, quantity: u32, selection: Selection) -> Self {
        Self {
            product,
            quantity,
            size: selection.size,
            color: selection.color,
        }
    }

    /// Identity of the line within a cart.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id,
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    /// Unit price after discount.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.product.sale_price()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product.id == key.product_id && self.size == key.size && self.color == key.color
    }
}

/// Identifies a cart line: product id plus chosen size and color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineKey {
    #[must_use]
    pub const fn new(product_id: ProductId, size: Option<String>, color: Option<String>) -> Self {
        Self {
            product_id,
            size,
            color,
        }
    }
}

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was increased.
    QuantityUpdated,
}

/// A visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging with an existing line of the same key.
    pub fn add(&mut self, item: CartItem) -> AddOutcome {
        let key = item.key();
        if let Some(existing) = self.items.iter_mut().find(|line| line.matches(&key)) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            AddOutcome::QuantityUpdated
        } else {
            self.items.push(item);
            AddOutcome::Added
        }
    }

    /// Remove the line with the given key. Returns whether a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(key));
        self.items.len() < before
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// Returns `true` if the cart changed. An unknown key is a no-op.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            return self.set_quantity(key, u32::MAX);
        };
        if quantity == 0 {
            return self.remove(key);
        }
        self.set_quantity(key, quantity)
    }

    fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        match self.items.iter_mut().find(|line| line.matches(key)) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of discounted line totals.
    #[must_use]
    pub fn total_amount(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of units across all lines (the navigation badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }
}
