//! Order domain entity

use chrono::{DateTime, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// `PENDING → PAID/CONFIRMED → COMPLETED`, or `CANCELLED`. Only paid-class
/// statuses consume capacity; PENDING orders are deliberately excluded so an
/// abandoned checkout never blocks a slot (stale ones are swept).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Paid,
    Confirmed,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "PENDING" => Self::Pending,
            "PAID" => Self::Paid,
            "CONFIRMED" => Self::Confirmed,
            "COMPLETED" => Self::Completed,
            _ => Self::Cancelled,
        }
    }

    /// Statuses that count toward slot/outlet capacity.
    pub const CAPACITY_CONSUMING: [&'static str; 3] = ["PAID", "CONFIRMED", "COMPLETED"];

    pub fn consumes_capacity(&self) -> bool {
        matches!(self, Self::Paid | Self::Confirmed | Self::Completed)
    }

    /// A customer may cancel only before the order is fulfilled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Paid | Self::Confirmed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the order is fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentType {
    DineIn,
    Takeaway,
    Delivery,
}

impl FulfillmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DineIn => "DINE_IN",
            Self::Takeaway => "TAKEAWAY",
            Self::Delivery => "DELIVERY",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "DINE_IN" => Self::DineIn,
            "DELIVERY" => Self::Delivery,
            _ => Self::Takeaway,
        }
    }

    /// Minimum booking lead time in days. Delivery requires next-day.
    pub fn min_days_ahead(&self) -> i64 {
        match self {
            Self::Delivery => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customization the customer picked, with the server-resolved modifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChosenCustomization {
    pub group: String,
    pub value: String,
    pub label: String,
    pub price_modifier: Decimal,
}

/// One priced cart line as persisted on the order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub base_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub customizations: Vec<ChosenCustomization>,
    pub line_total: Decimal,
}

/// A booking/order row.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: String,
    pub order_no: String,
    pub outlet_id: String,
    pub fulfillment_type: FulfillmentType,
    /// Calendar date of the booking, midnight-normalized
    pub booking_date: NaiveDate,
    /// Dine-in guest count
    pub pax_count: Option<i32>,
    pub time_slot_id: Option<String>,
    /// Legacy table-based dine-in reference; pax-based booking leaves it unset
    pub table_id: Option<String>,
    pub delivery_address: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub sst: Decimal,
    pub booking_fee: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Generate a human-legible, globally unique order number:
/// `AGP` + date stamp + 6 random uppercase alphanumerics.
pub fn generate_order_no(date: NaiveDate) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    format!("AGP{}{}", date.format("%Y%m%d"), suffix)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Paid,
            OrderStatus::Confirmed,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(s.as_str()), s);
        }
    }

    #[test]
    fn pending_and_cancelled_do_not_consume_capacity() {
        assert!(!OrderStatus::Pending.consumes_capacity());
        assert!(!OrderStatus::Cancelled.consumes_capacity());
        assert!(OrderStatus::Paid.consumes_capacity());
        assert!(OrderStatus::Confirmed.consumes_capacity());
        assert!(OrderStatus::Completed.consumes_capacity());
    }

    #[test]
    fn capacity_consuming_set_matches_predicate() {
        for s in OrderStatus::CAPACITY_CONSUMING {
            assert!(OrderStatus::from_str(s).consumes_capacity());
        }
    }

    #[test]
    fn cancellable_statuses() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Paid.is_cancellable());
        assert!(OrderStatus::Confirmed.is_cancellable());
        assert!(!OrderStatus::Completed.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn delivery_requires_one_day_lead() {
        assert_eq!(FulfillmentType::Delivery.min_days_ahead(), 1);
        assert_eq!(FulfillmentType::DineIn.min_days_ahead(), 0);
        assert_eq!(FulfillmentType::Takeaway.min_days_ahead(), 0);
    }

    #[test]
    fn order_no_shape() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let no = generate_order_no(date);
        assert!(no.starts_with("AGP20260310"));
        assert_eq!(no.len(), "AGP20260310".len() + 6);
        assert!(no
            .chars()
            .skip(3)
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn order_nos_are_unlikely_to_collide() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let a = generate_order_no(date);
        let b = generate_order_no(date);
        // 36^6 suffixes; two consecutive draws colliding would indicate a
        // broken RNG rather than bad luck.
        assert_ne!(a, b);
    }
}
