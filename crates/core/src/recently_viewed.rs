//! Recently viewed products: the last [`RecentlyViewed::CAPACITY`] product
//! pages a visitor opened, most recent first.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::ProductId;

/// Ordered product ids, most recent first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentlyViewed {
    ids: Vec<ProductId>,
}

impl RecentlyViewed {
    /// Maximum number of remembered products.
    pub const CAPACITY: usize = 5;

    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Move `id` to the front, dropping the oldest entry past capacity.
    pub fn record(&mut self, id: ProductId) {
        self.ids.retain(|existing| *existing != id);
        self.ids.insert(0, id);
        self.ids.truncate(Self::CAPACITY);
    }

    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Look the ids up in the catalog, skipping any that no longer exist.
    #[must_use]
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.ids.iter().filter_map(|id| catalog.get(*id)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(viewed: &RecentlyViewed) -> Vec<u32> {
        viewed.ids().iter().map(ProductId::as_u32).collect()
    }

    #[test]
    fn test_record_moves_to_front() {
        let mut viewed = RecentlyViewed::new();
        for id in [1, 2, 3, 2] {
            viewed.record(ProductId::new(id));
        }
        assert_eq!(ids(&viewed), vec![2, 3, 1]);
    }

    #[test]
    fn test_record_caps_at_five() {
        let mut viewed = RecentlyViewed::new();
        for id in 1..=7 {
            viewed.record(ProductId::new(id));
        }
        assert_eq!(ids(&viewed), vec![7, 6, 5, 4, 3]);
    }

    #[test]
    fn test_resolve_skips_unknown_ids() {
        let catalog = Catalog::builtin().unwrap();
        let viewed: RecentlyViewed = serde_json::from_str("[42, 3, 1]").unwrap();
        let names: Vec<&str> = viewed
            .resolve(&catalog)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Oversized Knit Sweater", "Classic White T-Shirt"]);
    }
}
