//! Payment domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Payment status as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "SUCCESS" => Self::Success,
            "FAILED" => Self::Failed,
            _ => Self::Pending,
        }
    }

    /// ToyyibPay callback `status_id`: 1 = success, 3 = failed,
    /// anything else stays pending.
    pub fn from_gateway_status_id(status_id: &str) -> Self {
        match status_id {
            "1" => Self::Success,
            "3" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment record, one per order.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    pub amount: Decimal,
    /// Gateway bill reference; set after bill creation succeeds
    pub bill_code: Option<String>,
    /// Gateway transaction reference from the callback
    pub transaction_id: Option<String>,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    /// Raw callback payload, kept verbatim for reconciliation
    pub callback_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_roundtrip() {
        for s in [
            PaymentStatus::Pending,
            PaymentStatus::Success,
            PaymentStatus::Failed,
        ] {
            assert_eq!(PaymentStatus::from_str(s.as_str()), s);
        }
    }

    #[test]
    fn gateway_status_id_mapping() {
        assert_eq!(
            PaymentStatus::from_gateway_status_id("1"),
            PaymentStatus::Success
        );
        assert_eq!(
            PaymentStatus::from_gateway_status_id("3"),
            PaymentStatus::Failed
        );
        assert_eq!(
            PaymentStatus::from_gateway_status_id("2"),
            PaymentStatus::Pending
        );
        assert_eq!(
            PaymentStatus::from_gateway_status_id(""),
            PaymentStatus::Pending
        );
    }
}
