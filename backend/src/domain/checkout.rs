//! Checkout request types and order totals.

mod address;

pub use address::{AddressInput, DEFAULT_COUNTRY, ShippingAddress};

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{IdempotencyKey, Money, OrderDetails, OrderItem, UserId, payload_fingerprint};

/// Goods and services tax applied to every order, in percent.
pub const TAX_PERCENT: u32 = 18;

/// Subtotal, tax, and grand total of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl CheckoutTotals {
    /// Totals for a subtotal: tax is [`TAX_PERCENT`] rounded half-up to the
    /// nearest paisa.
    ///
    /// ```
    /// use storefront::domain::{CheckoutTotals, Money};
    ///
    /// let totals = CheckoutTotals::from_subtotal(Money::from_minor(10_000));
    /// assert_eq!(totals.tax, Money::from_minor(1_800));
    /// assert_eq!(totals.total, Money::from_minor(11_800));
    /// ```
    pub fn from_subtotal(subtotal: Money) -> Self {
        let tax = subtotal.percent(TAX_PERCENT);
        Self {
            subtotal,
            tax,
            total: subtotal.plus(tax),
        }
    }

    /// Totals over priced order items.
    pub fn from_items(items: &[OrderItem]) -> Self {
        Self::from_subtotal(items.iter().map(|item| item.line_total).sum())
    }
}

/// Checkout command for the user's current cart.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub user_id: UserId,
    pub shipping: ShippingAddress,
    pub notes: Option<String>,
    pub idempotency_key: Option<IdempotencyKey>,
}

impl CheckoutRequest {
    /// Fingerprint of the submitted body, used to tell a retry from a
    /// different request reusing the same idempotency key.
    pub fn fingerprint(&self) -> String {
        payload_fingerprint(&json!({
            "shipping": self.shipping,
            "notes": self.notes,
        }))
    }
}

/// Result of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub order: OrderDetails,
    /// `true` when an earlier order for the same idempotency key was returned.
    pub replayed: bool,
}
