//! Order repository interface
//!
//! Covers the read/update paths used outside the booking transaction.
//! Order *creation* happens only inside the coordinator's serializable
//! transaction and is not part of this interface.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::model::{Order, OrderStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Order>>;

    /// Find an order by its human-readable order number
    async fn find_by_order_no(&self, order_no: &str) -> DomainResult<Option<Order>>;

    /// Set an order's status
    async fn update_status(&self, id: &str, status: OrderStatus) -> DomainResult<()>;

    /// Dine-in orders for an outlet on a date, any capacity-relevant status.
    /// Used by the table-availability listing.
    async fn find_dine_in_for_date(
        &self,
        outlet_id: &str,
        date: NaiveDate,
    ) -> DomainResult<Vec<Order>>;

    /// Delete PENDING orders created before `cutoff`, payments first.
    /// Returns the order numbers that were removed.
    async fn delete_pending_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<Vec<String>>;
}
