//! Checkout summary and price formatting.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::cart::Cart;

/// Display currency for formatted prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar, two decimals, `,` grouping.
    #[default]
    Usd,
    /// Indonesian rupiah, no decimals, `.` grouping.
    Idr,
}

impl Currency {
    /// Parse an ISO code (case-insensitive).
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Self::Usd),
            "IDR" => Some(Self::Idr),
            _ => None,
        }
    }

    /// ISO 4217 code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Idr => "IDR",
        }
    }
}

/// Format a price for display, e.g. `$1,599.00` or `Rp 1.599`.
pub fn format_price(amount: Decimal, currency: Currency) -> String {
    let (prefix, decimals, group_sep, decimal_sep) = match currency {
        Currency::Usd => ("$", 2, ',', '.'),
        Currency::Idr => ("Rp ", 0, '.', ','),
    };

    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(prefix);
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        let _ = write!(out, "{decimal_sep}{frac_part}");
    }
    out
}

/// Pricing rules applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutPolicy {
    /// Flat shipping fee, charged only when the subtotal is positive.
    pub flat_shipping: Decimal,
    /// Tax rate as a fraction (0.08 = 8%).
    pub tax_rate: Decimal,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            flat_shipping: Decimal::new(1000, 2),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

/// Totals shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute the order summary for a cart.
    pub fn from_cart(cart: &Cart, policy: &CheckoutPolicy) -> Self {
        let subtotal = cart.total();
        let shipping = if subtotal > Decimal::ZERO {
            policy.flat_shipping
        } else {
            Decimal::ZERO
        };
        let tax = (subtotal * policy.tax_rate).round_dp(2);
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Product, ProductId};
    use std::collections::BTreeMap;

    fn product(price: Decimal) -> Product {
        Product {
            id: ProductId::new("p"),
            name: "P".to_string(),
            description: String::new(),
            price,
            category: "Audio".to_string(),
            brand: String::new(),
            images: vec![],
            specs: BTreeMap::new(),
        }
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_price(Decimal::new(1599, 0), Currency::Usd), "$1,599.00");
        assert_eq!(format_price(Decimal::new(1999, 2), Currency::Usd), "$19.99");
        assert_eq!(format_price(Decimal::ZERO, Currency::Usd), "$0.00");
        assert_eq!(
            format_price(Decimal::new(123_456_789, 2), Currency::Usd),
            "$1,234,567.89"
        );
    }

    #[test]
    fn test_format_idr() {
        assert_eq!(format_price(Decimal::new(1_599_000, 0), Currency::Idr), "Rp 1.599.000");
        assert_eq!(format_price(Decimal::new(999, 0), Currency::Idr), "Rp 999");
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!(Currency::parse("idr"), Some(Currency::Idr));
        assert_eq!(Currency::parse("USD"), Some(Currency::Usd));
        assert_eq!(Currency::parse("EUR"), None);
    }

    #[test]
    fn test_empty_cart_has_no_shipping() {
        let summary = OrderSummary::from_cart(&Cart::new(), &CheckoutPolicy::default());
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.shipping, Decimal::ZERO);
    }

    #[test]
    fn test_summary_adds_shipping_and_tax() {
        let mut cart = Cart::new();
        cart.add(product(Decimal::new(100, 0)), 2).unwrap();

        let summary = OrderSummary::from_cart(&cart, &CheckoutPolicy::default());
        assert_eq!(summary.subtotal, Decimal::new(200, 0));
        assert_eq!(summary.shipping, Decimal::new(10, 0));
        assert_eq!(summary.tax, Decimal::new(16, 0));
        assert_eq!(summary.total, Decimal::new(226, 0));
    }
}
