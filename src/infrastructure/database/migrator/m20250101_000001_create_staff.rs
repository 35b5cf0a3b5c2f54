//! Migration to create staff table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Staff::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Staff::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Staff::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::PhoneNumber).string_len(32).null())
                    .col(ColumnDef::new(Staff::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Staff::Role)
                            .string_len(20)
                            .not_null()
                            .default("PASSENGER"),
                    )
                    .col(
                        ColumnDef::new(Staff::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Staff::ResetToken).string_len(64).null())
                    .col(
                        ColumnDef::new(Staff::ResetTokenExpiration)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Staff::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_role")
                    .table(Staff::Table)
                    .col(Staff::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    PasswordHash,
    Role,
    Active,
    ResetToken,
    ResetTokenExpiration,
    CreatedAt,
    UpdatedAt,
}
