//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_outlets;
mod m20250601_000002_create_tables;
mod m20250601_000003_create_time_slots;
mod m20250601_000004_create_menu_items;
mod m20250601_000005_create_orders;
mod m20250601_000006_create_payments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_outlets::Migration),
            Box::new(m20250601_000002_create_tables::Migration),
            Box::new(m20250601_000003_create_time_slots::Migration),
            Box::new(m20250601_000004_create_menu_items::Migration),
            Box::new(m20250601_000005_create_orders::Migration),
            Box::new(m20250601_000006_create_payments::Migration),
        ]
    }
}
