//! Payment repository interface

use async_trait::async_trait;

use super::model::Payment;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Find a payment by its gateway bill code
    async fn find_by_bill_code(&self, bill_code: &str) -> DomainResult<Option<Payment>>;

    /// Find the payment belonging to an order
    async fn find_by_order_id(&self, order_id: &str) -> DomainResult<Option<Payment>>;

    /// Persist the gateway bill reference after bill creation
    async fn set_bill_code(&self, payment_id: &str, bill_code: &str) -> DomainResult<()>;

    /// Update status/transaction/paid-at/callback fields from a callback
    async fn update(&self, payment: Payment) -> DomainResult<()>;
}
