//! Checkout: shipping details and order totals.
//!
//! Orders are never charged. The payment method is recorded for the order
//! confirmation only.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::types::{Email, EmailError, Price};

/// Sales tax applied to the cart subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Country prefilled on a fresh checkout form.
pub const DEFAULT_COUNTRY: &str = "United States";

/// Errors raised by [`ShippingDetails::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingInformation(Vec<&'static str>),
    #[error("Invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),
}

/// Shipping details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub notes: String,
}

impl Default for ShippingDetails {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            notes: String::new(),
        }
    }
}

impl ShippingDetails {
    /// Check the fields an order cannot ship without.
    ///
    /// First name, last name, email and address are required; the email must
    /// also parse. Returns the normalized email on success.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingInformation`] naming every blank
    /// required field, or [`ValidationError::InvalidEmail`].
    pub fn validate(&self) -> Result<Email, ValidationError> {
        let missing: Vec<&'static str> = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingInformation(missing));
        }

        Ok(Email::parse(&self.email)?)
    }
}

/// How the shopper intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::Paypal, Self::BankTransfer];

    /// Form value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::Paypal => "paypal",
            Self::BankTransfer => "bank-transfer",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::Paypal => "PayPal",
            Self::BankTransfer => "Bank Transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A payment method value that isn't one of [`PaymentMethod::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub size: Option<String>,
    pub total: Price,
}

/// Totals shown beside the cart and checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub subtotal: Price,
    /// Shipping is always free.
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let lines = cart
            .items()
            .iter()
            .map(|item| OrderLine {
                name: item.product.name.clone(),
                quantity: item.quantity,
                size: item.size.clone(),
                total: item.line_total(),
            })
            .collect();
        let subtotal = cart.total_amount();
        let shipping = Price::zero();
        let tax = subtotal.scaled(TAX_RATE);

        Self {
            lines,
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::catalog::Catalog;
    use crate::types::ProductId;

    fn filled() -> ShippingDetails {
        ShippingDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "Ada@Example.com".to_string(),
            address: "12 Analytical Way".to_string(),
            ..ShippingDetails::default()
        }
    }

    #[test]
    fn test_default_country() {
        assert_eq!(ShippingDetails::default().country, "United States");
    }

    #[test]
    fn test_validate_accepts_required_fields_only() {
        let email = filled().validate().unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let details = ShippingDetails {
            first_name: "  ".to_string(),
            address: String::new(),
            ..filled()
        };
        assert_eq!(
            details.validate(),
            Err(ValidationError::MissingInformation(vec![
                "first name",
                "address"
            ]))
        );
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let details = ShippingDetails {
            email: "ada at example".to_string(),
            ..filled()
        };
        assert!(matches!(
            details.validate(),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_payment_method_parse() {
        assert_eq!("paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::Paypal));
        assert_eq!(
            "cash".parse::<PaymentMethod>(),
            Err(UnknownPaymentMethod("cash".to_string()))
        );
        assert_eq!(
            UnknownPaymentMethod("cash".to_string()).to_string(),
            "unknown payment method: cash"
        );
        assert_eq!(PaymentMethod::BankTransfer.to_string(), "Bank Transfer");
    }

    #[test]
    fn test_order_summary_adds_tax() {
        let catalog = Catalog::builtin().unwrap();
        let mut cart = Cart::new();
        let bag = catalog.get(ProductId::new(4)).unwrap().clone();
        let selection = bag.default_selection();
        cart.add(CartItem::new(bag, 2, selection));

        let summary = OrderSummary::from_cart(&cart);
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.subtotal.to_string(), "$259.98");
        assert_eq!(summary.shipping, Price::zero());
        // 259.98 * 0.08 = 20.7984
        assert_eq!(summary.tax.to_string(), "$20.80");
        assert_eq!(summary.total.to_string(), "$280.78");
    }
}
