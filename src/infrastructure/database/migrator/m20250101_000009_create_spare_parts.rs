//! Migration to create spare_parts table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SpareParts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpareParts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SpareParts::PartNumber)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SpareParts::Name).string_len(255).not_null())
                    .col(ColumnDef::new(SpareParts::Description).text().null())
                    .col(
                        ColumnDef::new(SpareParts::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SpareParts::MinimumStockLevel)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(SpareParts::Location).string_len(100).null())
                    .col(ColumnDef::new(SpareParts::Supplier).string_len(255).null())
                    .col(ColumnDef::new(SpareParts::UnitPrice).double().null())
                    .col(ColumnDef::new(SpareParts::Category).string_len(100).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_spare_parts_category")
                    .table(SpareParts::Table)
                    .col(SpareParts::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SpareParts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SpareParts {
    Table,
    Id,
    PartNumber,
    Name,
    Description,
    Quantity,
    MinimumStockLevel,
    Location,
    Supplier,
    UnitPrice,
    Category,
}
