//! Display data for templates.
//!
//! Templates never see core types directly: prices arrive preformatted and
//! optional values are flattened to what the markup needs.

use threadline_core::{
    Cart, CartItem, Category, OrderSummary, PaymentMethod, Product, Wishlist,
};

/// Shown on the detail page of a product without a description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// How many same-category products the detail page suggests.
pub const RELATED_LIMIT: usize = 4;

/// A product tile in a grid.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub category: &'static str,
    /// Price the shopper pays.
    pub price: String,
    /// Struck-through list price, present only when discounted.
    pub list_price: Option<String>,
    pub discount: Option<u8>,
    pub is_new: bool,
    /// Size sent by the quick-add button (empty when the product has none).
    pub quick_size: String,
    /// Color sent by the quick-add button (empty when the product has none).
    pub quick_color: String,
    pub in_wishlist: bool,
}

impl ProductCardView {
    #[must_use]
    pub fn new(product: &Product, wishlist: &Wishlist) -> Self {
        let quick = product.default_selection();
        Self {
            id: product.id.as_u32(),
            name: product.name.clone(),
            image: product.image.clone(),
            category: product.category.name(),
            price: product.sale_price().display(),
            list_price: product.discount.map(|_| product.list_price().display()),
            discount: product.discount,
            is_new: product.is_new,
            quick_size: quick.size.unwrap_or_default(),
            quick_color: quick.color.unwrap_or_default(),
            in_wishlist: wishlist.contains(product.id),
        }
    }

    /// Cards for a list of products.
    #[must_use]
    pub fn list<'a>(
        products: impl IntoIterator<Item = &'a Product>,
        wishlist: &Wishlist,
    ) -> Vec<Self> {
        products
            .into_iter()
            .map(|product| Self::new(product, wishlist))
            .collect()
    }
}

/// Detail-page fields beyond the product's card.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub category_slug: &'static str,
    pub description: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl ProductDetailView {
    #[must_use]
    pub fn new(product: &Product) -> Self {
        Self {
            category_slug: product.category.slug(),
            description: product
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
        }
    }
}

/// A navigation link to a category page.
#[derive(Debug, Clone)]
pub struct CategoryLinkView {
    pub name: &'static str,
    pub slug: &'static str,
    pub count: usize,
}

impl CategoryLinkView {
    #[must_use]
    pub fn new(category: Category, count: usize) -> Self {
        Self {
            name: category.name(),
            slug: category.slug(),
            count,
        }
    }
}

/// One line of the cart page.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: u32,
    pub name: String,
    pub image: String,
    /// Empty when the product has no sizes.
    pub size: String,
    /// Empty when the product has no colors.
    pub color: String,
    pub quantity: u32,
    /// Quantity posted by the "-" button. Never below one; removal has its
    /// own button.
    pub decrement_to: u32,
    pub increment_to: u32,
    pub unit_price: String,
    /// Struck-through list price, present only when discounted.
    pub list_price: Option<String>,
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: item.product.id.as_u32(),
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            size: item.size.clone().unwrap_or_default(),
            color: item.color.clone().unwrap_or_default(),
            quantity: item.quantity,
            decrement_to: item.quantity.saturating_sub(1).max(1),
            increment_to: item.quantity.saturating_add(1),
            unit_price: item.unit_price().display(),
            list_price: item
                .product
                .discount
                .map(|_| item.product.list_price().display()),
            line_total: item.line_total().display(),
        }
    }
}

/// One row of the order summary.
#[derive(Debug, Clone)]
pub struct SummaryLineView {
    pub name: String,
    pub quantity: u32,
    pub size: String,
    pub total: String,
}

/// Order summary with formatted totals.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub lines: Vec<SummaryLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

impl From<&Cart> for SummaryView {
    fn from(cart: &Cart) -> Self {
        let summary = OrderSummary::from_cart(cart);
        Self {
            lines: summary
                .lines
                .into_iter()
                .map(|line| SummaryLineView {
                    name: line.name,
                    quantity: line.quantity,
                    size: line.size.unwrap_or_default(),
                    total: line.total.display(),
                })
                .collect(),
            subtotal: summary.subtotal.display(),
            shipping: if summary.shipping.amount.is_zero() {
                "Free".to_string()
            } else {
                summary.shipping.display()
            },
            tax: summary.tax.display(),
            total: summary.total.display(),
        }
    }
}

/// A radio option on the checkout form.
#[derive(Debug, Clone)]
pub struct PaymentOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

impl PaymentOptionView {
    /// All payment methods with `selected` checked.
    #[must_use]
    pub fn all(selected: PaymentMethod) -> Vec<Self> {
        PaymentMethod::ALL
            .into_iter()
            .map(|method| Self {
                value: method.as_str(),
                label: method.label(),
                checked: method == selected,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use threadline_core::{Catalog, ProductId};

    use super::*;

    #[test]
    fn test_card_shows_list_price_only_when_discounted() {
        let catalog = Catalog::builtin().unwrap();
        let wishlist = Wishlist::new();

        let jeans = ProductCardView::new(catalog.get(ProductId::new(2)).unwrap(), &wishlist);
        assert_eq!(jeans.price, "$50.99");
        assert_eq!(jeans.list_price.as_deref(), Some("$59.99"));
        assert_eq!(jeans.quick_size, "28");

        let tee = ProductCardView::new(catalog.get(ProductId::new(1)).unwrap(), &wishlist);
        assert_eq!(tee.price, "$29.99");
        assert!(tee.list_price.is_none());
        assert!(tee.is_new);
    }

    #[test]
    fn test_card_marks_wishlisted_products() {
        let catalog = Catalog::builtin().unwrap();
        let bag = catalog.get(ProductId::new(4)).unwrap();
        let mut wishlist = Wishlist::new();
        wishlist.add(bag.clone());

        let card = ProductCardView::new(bag, &wishlist);
        assert!(card.in_wishlist);
        assert!(card.quick_size.is_empty());
    }

    #[test]
    fn test_summary_shipping_is_free() {
        let catalog = Catalog::builtin().unwrap();
        let mut cart = Cart::new();
        let tee = catalog.get(ProductId::new(1)).unwrap().clone();
        let selection = tee.default_selection();
        cart.add(CartItem::new(tee, 1, selection));

        let summary = SummaryView::from(&cart);
        assert_eq!(summary.shipping, "Free");
        assert_eq!(summary.subtotal, "$29.99");
        assert_eq!(summary.tax, "$2.40");
        assert_eq!(summary.total, "$32.39");
        assert_eq!(summary.lines[0].size, "XS");
    }

    #[test]
    fn test_cart_line_quantity_buttons() {
        let catalog = Catalog::builtin().unwrap();
        let dress = catalog.get(ProductId::new(6)).unwrap().clone();
        let selection = dress.default_selection();

        let line = CartLineView::from(&CartItem::new(dress.clone(), 1, selection.clone()));
        assert_eq!(line.decrement_to, 1);
        assert_eq!(line.increment_to, 2);
        assert_eq!(line.list_price.as_deref(), Some("$89.99"));
        assert!(line.color.is_empty());

        let line = CartLineView::from(&CartItem::new(dress, 3, selection));
        assert_eq!(line.decrement_to, 2);
    }

    #[test]
    fn test_payment_options_check_selected() {
        let options = PaymentOptionView::all(PaymentMethod::Paypal);
        assert_eq!(options.len(), 3);
        assert!(options.iter().filter(|o| o.checked).all(|o| o.value == "paypal"));
    }
}
