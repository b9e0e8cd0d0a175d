//! Outlet repository interface

use async_trait::async_trait;

use super::model::Outlet;
use crate::domain::DomainResult;

#[async_trait]
pub trait OutletRepository: Send + Sync {
    /// Find an outlet by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Outlet>>;

    /// All active outlets, ordered by name
    async fn find_active(&self) -> DomainResult<Vec<Outlet>>;
}
