//! Create tables table (legacy table-based dine-in seating)

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
                    .table(Tables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tables::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tables::OutletId).string().not_null())
                    .col(ColumnDef::new(Tables::TableNo).string().not_null())
                    .col(ColumnDef::new(Tables::Zone).string())
                    .col(
                        ColumnDef::new(Tables::Capacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Tables::Status)
                            .string()
                            .not_null()
                            .default("AVAILABLE"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tables_outlet")
                            .from(Tables::Table, Tables::OutletId)
                            .to(Outlets::Table, Outlets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tables_outlet")
                    .table(Tables::Table)
                    .col(Tables::OutletId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tables::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Tables {
    Table,
    Id,
    OutletId,
    TableNo,
    Zone,
    Capacity,
    Status,
}
