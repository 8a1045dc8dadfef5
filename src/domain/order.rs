use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cart::CartLine;
use crate::domain::Upload;

/// Contact details collected by the checkout form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether an administrator may move an order from `self` to `next`.
    /// Re-applying the current status is always allowed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        match self {
            OrderStatus::Pending => true,
            OrderStatus::Processing => next.is_terminal(),
            OrderStatus::Completed | OrderStatus::Cancelled => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown order status: {s}"))
    }
}

/// A checkout snapshot. Only `status` and `updated_at` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub payment_proof: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub payment_proof: Option<String>,
}

/// Everything checkout hands to the backend. The payment proof is uploaded
/// before the order record is written.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer: CustomerInfo,
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub payment_proof: Option<Upload>,
}

/// Outcome of a successful order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: String,
    pub total: Decimal,
    pub item_count: u32,
    pub payment_proof: Option<String>,
    /// Set when the proof upload failed but the order was still recorded.
    /// The shopper must send the proof through another channel.
    pub upload_warning: Option<String>,
}
