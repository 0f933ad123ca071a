//! Wishlist state: saved products, unique by id, in the order they were saved.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::ProductId;

/// What [`Wishlist::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistOutcome {
    Added,
    AlreadyPresent,
}

/// A visitor's wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    products: Vec<Product>,
}

impl Wishlist {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Save a product unless a product with the same id is already saved.
    pub fn add(&mut self, product: Product) -> WishlistOutcome {
        if self.contains(product.id) {
            WishlistOutcome::AlreadyPresent
        } else {
            self.products.push(product);
            WishlistOutcome::Added
        }
    }

    /// Drop a product. Returns whether it was saved.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|product| product.id != id);
        self.products.len() < before
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|product| product.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_add_is_idempotent() {
        let catalog = Catalog::builtin().unwrap();
        let sweater = catalog.get(ProductId::new(3)).unwrap().clone();

        let mut wishlist = Wishlist::new();
        assert_eq!(wishlist.add(sweater.clone()), WishlistOutcome::Added);
        assert_eq!(wishlist.add(sweater), WishlistOutcome::AlreadyPresent);
        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.contains(ProductId::new(3)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let catalog = Catalog::builtin().unwrap();
        let mut wishlist = Wishlist::new();
        for id in [5, 1, 9] {
            wishlist.add(catalog.get(ProductId::new(id)).unwrap().clone());
        }

        assert!(wishlist.remove(ProductId::new(1)));
        assert!(!wishlist.remove(ProductId::new(1)));

        let ids: Vec<u32> = wishlist.products().iter().map(|p| p.id.as_u32()).collect();
        assert_eq!(ids, vec![5, 9]);
    }
}
