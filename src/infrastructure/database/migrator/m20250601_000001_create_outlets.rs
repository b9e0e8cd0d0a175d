//! Create outlets table
//!
//! Physical restaurant locations with operating hours, the outlet-wide
//! dine-in pax ceiling and the delivery fee.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Outlets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Outlets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Outlets::Name).string().not_null())
                    .col(ColumnDef::new(Outlets::Address).string().not_null())
                    .col(ColumnDef::new(Outlets::Phone).string())
                    .col(ColumnDef::new(Outlets::OpenTime).string().not_null())
                    .col(ColumnDef::new(Outlets::CloseTime).string().not_null())
                    .col(
                        ColumnDef::new(Outlets::MaxCapacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Outlets::DeliveryFee)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Outlets::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Outlets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Outlets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_outlets_active")
                    .table(Outlets::Table)
                    .col(Outlets::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Outlets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Outlets {
    Table,
    Id,
    Name,
    Address,
    Phone,
    OpenTime,
    CloseTime,
    MaxCapacity,
    DeliveryFee,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
