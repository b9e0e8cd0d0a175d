//! Time slot repository interface

use async_trait::async_trait;

use super::model::TimeSlot;
use crate::domain::DomainResult;

#[async_trait]
pub trait TimeSlotRepository: Send + Sync {
    /// Find a slot by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<TimeSlot>>;

    /// Active slots for an outlet, ordered by time
    async fn find_active_for_outlet(&self, outlet_id: &str) -> DomainResult<Vec<TimeSlot>>;
}
