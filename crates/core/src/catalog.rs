//! The product catalog.
//!
//! The storefront sells a fixed set of products shipped inside the binary as
//! a JSON document. [`Catalog::builtin`] parses it once at startup; every
//! query afterwards is a scan over that in-memory list.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// The catalog document compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/products.json");

/// Errors raised while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("product id {0} appears more than once")]
    DuplicateId(ProductId),
    #[error("product {id} has a discount of {discount}%, expected 1-99")]
    InvalidDiscount { id: ProductId, discount: u8 },
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),
}

/// Errors raised when a shopper's size or color choice doesn't fit a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select a size")]
    MissingSize,
    #[error("Please select a color")]
    MissingColor,
    #[error("size {0} is not offered for this product")]
    UnknownSize(String),
    #[error("color {0} is not offered for this product")]
    UnknownColor(String),
}

/// Top-level product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Women,
    Men,
    Accessories,
}

impl Category {
    /// All categories in navigation order.
    pub const ALL: [Self; 3] = [Self::Women, Self::Men, Self::Accessories];

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Women => "Women",
            Self::Men => "Men",
            Self::Accessories => "Accessories",
        }
    }

    /// URL segment (`/category/{slug}`).
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Women => "women",
            Self::Men => "men",
            Self::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A category name that isn't one of [`Category::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive, so `/category/WOMEN` and `/category/women` agree.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A product as listed in the catalog.
///
/// Field names serialize in camelCase so a product stored in a visitor's
/// cart or wishlist keeps the same JSON shape as the catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Percentage off the list price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_new: bool,
}

/// A validated size/color choice for a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub size: Option<String>,
    pub color: Option<String>,
}

impl Product {
    /// List price.
    #[must_use]
    pub const fn list_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Price after the product's discount, if any.
    #[must_use]
    pub fn sale_price(&self) -> Price {
        match self.discount {
            Some(percent) => self.list_price().discounted(percent),
            None => self.list_price(),
        }
    }

    /// Check a shopper's size and color choice against what the product offers.
    ///
    /// Blank input counts as no choice. Products without sizes (or colors)
    /// ignore that input entirely.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] when a required choice is missing or names
    /// an option the product doesn't have.
    pub fn resolve_selection(
        &self,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<Selection, SelectionError> {
        let size = pick(&self.sizes, size, SelectionError::MissingSize, |s| {
            SelectionError::UnknownSize(s.to_string())
        })?;
        let color = pick(&self.colors, color, SelectionError::MissingColor, |c| {
            SelectionError::UnknownColor(c.to_string())
        })?;
        Ok(Selection { size, color })
    }

    /// The choice a "quick add" button uses: the first size and first color.
    #[must_use]
    pub fn default_selection(&self) -> Selection {
        Selection {
            size: self.sizes.first().cloned(),
            color: self.colors.first().cloned(),
        }
    }
}

fn pick(
    offered: &[String],
    chosen: Option<&str>,
    missing: SelectionError,
    unknown: impl FnOnce(&str) -> SelectionError,
) -> Result<Option<String>, SelectionError> {
    if offered.is_empty() {
        return Ok(None);
    }
    match chosen.map(str::trim).filter(|value| !value.is_empty()) {
        None => Err(missing),
        Some(value) => offered
            .iter()
            .find(|option| option.eq_ignore_ascii_case(value))
            .cloned()
            .map(Some)
            .ok_or_else(|| unknown(value)),
    }
}

/// Listing order for category pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Catalog order ("Featured").
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// Parse a `?sort=` value. Unknown values fall back to catalog order.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            _ => Self::Default,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Sort products in place by list price. The sort is stable, so equal
    /// prices keep catalog order.
    pub fn apply(self, products: &mut [&Product]) {
        match self {
            Self::Default => {}
            Self::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}

/// The in-memory product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded document is invalid. That is a build
    /// defect, surfaced at startup rather than on first request.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog document (a JSON array of products).
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, duplicate ids, a discount outside
    /// 1-99, or a negative price.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            match product.discount {
                Some(discount) if !(1..=99).contains(&discount) => {
                    return Err(CatalogError::InvalidDiscount {
                        id: product.id,
                        discount,
                    });
                }
                _ => {}
            }
            if product.price.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }

        Ok(Self { products })
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
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

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// New arrivals.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_new).collect()
    }

    /// Products currently on sale.
    #[must_use]
    pub fn discounted(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.discount.is_some())
            .collect()
    }

    /// Products in a category, matched case-insensitively by name.
    ///
    /// An unknown category yields an empty list, not an error.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        category
            .parse::<Category>()
            .map(|category| {
                self.products
                    .iter()
                    .filter(|p| p.category == category)
                    .collect()
            })
            .unwrap_or_default()
    }
}
