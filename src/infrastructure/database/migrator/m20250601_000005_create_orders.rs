//! Create orders table
//!
//! The capacity invariant is enforced against aggregates over
//! (time_slot_id, booking_date, status), so those three get a composite
//! index.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_outlets::Outlets;
use super::m20250601_000003_create_time_slots::TimeSlots;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Orders::OrderNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Orders::OutletId).string().not_null())
                    .col(ColumnDef::new(Orders::FulfillmentType).string().not_null())
                    .col(ColumnDef::new(Orders::BookingDate).date().not_null())
                    .col(ColumnDef::new(Orders::PaxCount).integer())
                    .col(ColumnDef::new(Orders::TimeSlotId).string())
                    .col(ColumnDef::new(Orders::TableId).string())
                    .col(ColumnDef::new(Orders::DeliveryAddress).string())
                    .col(ColumnDef::new(Orders::CustomerName).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Orders::CustomerPhone).string().not_null())
                    .col(ColumnDef::new(Orders::Items).json().not_null())
                    .col(
                        ColumnDef::new(Orders::Subtotal)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Orders::Sst).decimal_len(10, 2).not_null())
                    .col(
                        ColumnDef::new(Orders::BookingFee)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::DeliveryFee)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Orders::Total).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Orders::Notes).string())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string()
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Orders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_outlet")
                            .from(Orders::Table, Orders::OutletId)
                            .to(Outlets::Table, Outlets::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_time_slot")
                            .from(Orders::Table, Orders::TimeSlotId)
                            .to(TimeSlots::Table, TimeSlots::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_slot_date_status")
                    .table(Orders::Table)
                    .col(Orders::TimeSlotId)
                    .col(Orders::BookingDate)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_outlet_date")
                    .table(Orders::Table)
                    .col(Orders::OutletId)
                    .col(Orders::BookingDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_status_created")
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Orders {
    Table,
    Id,
    OrderNo,
    OutletId,
    FulfillmentType,
    BookingDate,
    PaxCount,
    TimeSlotId,
    TableId,
    DeliveryAddress,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    Items,
    Subtotal,
    Sst,
    BookingFee,
    DeliveryFee,
    Total,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}
