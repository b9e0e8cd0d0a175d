//! Menu item repository interface

use async_trait::async_trait;

use super::model::MenuItem;
use crate::domain::DomainResult;

#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Bulk-fetch *active* menu items by ID. Inactive or unknown IDs are
    /// simply absent from the result; pricing treats absence as
    /// item-unavailable.
    async fn find_active_by_ids(&self, ids: &[String]) -> DomainResult<Vec<MenuItem>>;
}
