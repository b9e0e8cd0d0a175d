//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories; consumers request only the repository they need.

use super::menu::MenuItemRepository;
use super::order::OrderRepository;
use super::outlet::OutletRepository;
use super::payment::PaymentRepository;
use super::table::TableRepository;
use super::time_slot::TimeSlotRepository;

/// Provides access to all domain repositories.
pub trait RepositoryProvider: Send + Sync {
    fn outlets(&self) -> &dyn OutletRepository;
    fn tables(&self) -> &dyn TableRepository;
    fn time_slots(&self) -> &dyn TimeSlotRepository;
    fn menu_items(&self) -> &dyn MenuItemRepository;
    fn orders(&self) -> &dyn OrderRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}
