//! Migration to create emergency_reports table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmergencyReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmergencyReports::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmergencyReports::DriverId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmergencyReports::BusId).big_integer().null())
                    .col(
                        ColumnDef::new(EmergencyReports::EmergencyType)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyReports::Location)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmergencyReports::Description).text().not_null())
                    .col(
                        ColumnDef::new(EmergencyReports::Severity)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EmergencyReports::Latitude).double().null())
                    .col(ColumnDef::new(EmergencyReports::Longitude).double().null())
                    .col(
                        ColumnDef::new(EmergencyReports::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(EmergencyReports::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyReports::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmergencyReports::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_reports_driver")
                            .from(EmergencyReports::Table, EmergencyReports::DriverId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_emergency_reports_driver_time")
                    .table(EmergencyReports::Table)
                    .col(EmergencyReports::DriverId)
                    .col(EmergencyReports::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmergencyReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EmergencyReports {
    Table,
    Id,
    DriverId,
    BusId,
    EmergencyType,
    Location,
    Description,
    Severity,
    Latitude,
    Longitude,
    Status,
    Timestamp,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
}
