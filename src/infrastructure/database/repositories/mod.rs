//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod menu_item_repository;
pub mod order_repository;
pub mod outlet_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod table_repository;
pub mod time_slot_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

/// Map a SeaORM error into the domain taxonomy, preserving the driver
/// message so serialization conflicts stay detectable.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}
