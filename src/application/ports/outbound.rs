//! Outbound ports — interfaces for the external collaborators the booking
//! flow drives.
//!
//! [`PaymentGateway`] decouples the coordinator from the concrete bill API;
//! the production implementation lives in
//! [`ToyyibPayGateway`](crate::infrastructure::gateway::ToyyibPayGateway).
//! [`Notifier`] is the fire-and-forget confirmation/reminder channel; its
//! production implementation relays to a configured webhook
//! ([`WebhookNotifier`](crate::infrastructure::notifier::WebhookNotifier)).
//!
//! Gateway calls always happen OUTSIDE the booking transaction — a bill
//! request must never hold a database transaction open.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{DomainResult, Order};

/// Everything the gateway needs to raise a payable bill for an order.
#[derive(Debug, Clone)]
pub struct BillRequest {
    pub order_id: String,
    pub order_no: String,
    pub outlet_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    /// Authoritative server-side total
    pub amount: Decimal,
}

/// A successfully created gateway bill.
#[derive(Debug, Clone)]
pub struct CreatedBill {
    /// Gateway reference, persisted on the payment row
    pub bill_code: String,
    /// Customer-facing payment URL
    pub payment_url: String,
}

/// Port for the external payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payable bill referencing an order.
    async fn create_bill(&self, request: &BillRequest) -> DomainResult<CreatedBill>;

    /// Fetch the gateway's transaction list for a bill (reconciliation).
    async fn bill_transactions(&self, bill_code: &str) -> DomainResult<serde_json::Value>;
}

/// Port for customer-facing booking notifications.
///
/// Dispatch is fire-and-forget: callers spawn these after the transaction
/// commits and only log failures.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the booking confirmation for a paid order.
    async fn send_confirmation(&self, order: &Order) -> DomainResult<()>;

    /// Send the booking-day reminder.
    async fn send_reminder(&self, order: &Order) -> DomainResult<()>;
}
