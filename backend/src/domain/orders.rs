//! Orders, order lines, and the fulfilment status machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalogue::Unit;
use super::validation::{ValidationError, Violation};
use super::{Error, Money, OrderId, ProductId, ShippingAddress, UserId};

/// Fulfilment status of an order.
///
/// Statuses only move forward along
/// `pending → confirmed → processing → shipped → delivered`; any status that
/// is not final may move to `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    fn rank(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::Processing => Some(2),
            Self::Shipped => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled => None,
        }
    }

    /// Whether no further transitions are possible.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_final() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(current), Some(target)) => target > current,
            (None, Some(_)) => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ValidationError::new("status", Violation::UnknownValue)),
        }
    }
}

/// Order header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub shipping: ShippingAddress,
    pub notes: Option<String>,
    /// Client-supplied idempotency key, unique per user.
    #[serde(skip)]
    pub idempotency_key: Option<String>,
    /// Fingerprint of the checkout payload the key was first used with.
    #[serde(skip)]
    pub request_fingerprint: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Move to `next`, stamping `updated_at`.
    ///
    /// Returns a `conflict` error when the transition is not allowed.
    pub fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), Error> {
        if !self.status.can_transition_to(next) {
            return Err(Error::conflict(format!(
                "order cannot move from {} to {}",
                self.status, next
            ))
            .with_details(json!({
                "from": self.status.as_str(),
                "to": next.as_str(),
            })));
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

/// Human-facing order number, e.g. `MT-20260118-3FA85F6457174562`.
///
/// The suffix is the first 16 hex digits of the order id.
pub fn order_number(id: &OrderId, placed_at: DateTime<Utc>) -> String {
    let simple = id.as_uuid().simple().to_string().to_uppercase();
    let suffix: String = simple.chars().take(16).collect();
    format!("MT-{}-{suffix}", placed_at.format("%Y%m%d"))
}

/// One priced line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub unit: Unit,
    pub line_total: Money,
}

/// Order with its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
