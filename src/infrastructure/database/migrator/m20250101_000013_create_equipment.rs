//! Migration to create equipment and maintenance_records tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Equipment::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Equipment::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Equipment::Model).string_len(100).null())
                    .col(
                        ColumnDef::new(Equipment::SerialNumber)
                            .string_len(100)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Equipment::InstallationDate).date().null())
                    .col(ColumnDef::new(Equipment::Location).string_len(255).null())
                    .col(
                        ColumnDef::new(Equipment::Status)
                            .string_len(20)
                            .not_null()
                            .default("OPERATIONAL"),
                    )
                    .col(ColumnDef::new(Equipment::LastMaintenanceDate).date().null())
                    .col(
                        ColumnDef::new(Equipment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Equipment::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_equipment_status")
                    .table(Equipment::Table)
                    .col(Equipment::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MaintenanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MaintenanceRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::EquipmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::StartDate).date().not_null())
                    .col(ColumnDef::new(MaintenanceRecords::EndDate).date().null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::EstimatedHours)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::Priority)
                            .string_len(10)
                            .not_null()
                            .default("MEDIUM"),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::Description).text().not_null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_records_equipment")
                            .from(MaintenanceRecords::Table, MaintenanceRecords::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_records_equipment")
                    .table(MaintenanceRecords::Table)
                    .col(MaintenanceRecords::EquipmentId)
                    .col(MaintenanceRecords::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_tasks_equipment")
                    .table(MaintenanceTasks::Table)
                    .col(MaintenanceTasks::EquipmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_maintenance_tasks_equipment")
                    .table(MaintenanceTasks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(MaintenanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Equipment {
    Table,
    Id,
    Name,
    Model,
    SerialNumber,
    InstallationDate,
    Location,
    Status,
    LastMaintenanceDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MaintenanceRecords {
    Table,
    Id,
    EquipmentId,
    StartDate,
    EndDate,
    EstimatedHours,
    Priority,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum MaintenanceTasks {
    Table,
    EquipmentId,
}
