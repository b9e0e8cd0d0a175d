//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::menu::MenuItemRepository;
use crate::domain::order::OrderRepository;
use crate::domain::outlet::OutletRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::table::TableRepository;
use crate::domain::time_slot::TimeSlotRepository;

use super::menu_item_repository::SeaOrmMenuItemRepository;
use super::order_repository::SeaOrmOrderRepository;
use super::outlet_repository::SeaOrmOutletRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::table_repository::SeaOrmTableRepository;
use super::time_slot_repository::SeaOrmTimeSlotRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    outlets: SeaOrmOutletRepository,
    tables: SeaOrmTableRepository,
    time_slots: SeaOrmTimeSlotRepository,
    menu_items: SeaOrmMenuItemRepository,
    orders: SeaOrmOrderRepository,
    payments: SeaOrmPaymentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            outlets: SeaOrmOutletRepository::new(db.clone()),
            tables: SeaOrmTableRepository::new(db.clone()),
            time_slots: SeaOrmTimeSlotRepository::new(db.clone()),
            menu_items: SeaOrmMenuItemRepository::new(db.clone()),
            orders: SeaOrmOrderRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn outlets(&self) -> &dyn OutletRepository {
        &self.outlets
    }

    fn tables(&self) -> &dyn TableRepository {
        &self.tables
    }

    fn time_slots(&self) -> &dyn TimeSlotRepository {
        &self.time_slots
    }

    fn menu_items(&self) -> &dyn MenuItemRepository {
        &self.menu_items
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}
