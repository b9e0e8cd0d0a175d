//! Create time_slots table
//!
//! No running order counter here: capacity is derived from order rows so
//! cancellations can never leave the count drifted.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_outlets::Outlets;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TimeSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeSlots::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeSlots::OutletId).string().not_null())
                    .col(ColumnDef::new(TimeSlots::Time).string().not_null())
                    .col(
                        ColumnDef::new(TimeSlots::MaxOrders)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(TimeSlots::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_time_slots_outlet")
                            .from(TimeSlots::Table, TimeSlots::OutletId)
                            .to(Outlets::Table, Outlets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_time_slots_outlet")
                    .table(TimeSlots::Table)
                    .col(TimeSlots::OutletId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimeSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum TimeSlots {
    Table,
    Id,
    OutletId,
    Time,
    MaxOrders,
    IsActive,
}
