//! Table repository interface

use async_trait::async_trait;

use super::model::Table;
use crate::domain::DomainResult;

#[async_trait]
pub trait TableRepository: Send + Sync {
    /// All tables for an outlet, optionally filtered by zone,
    /// ordered by zone then table number
    async fn find_for_outlet(&self, outlet_id: &str, zone: Option<&str>)
        -> DomainResult<Vec<Table>>;
}
