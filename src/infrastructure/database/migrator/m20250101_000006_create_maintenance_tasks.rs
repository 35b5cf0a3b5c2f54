//! Migration to create maintenance_tasks table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MaintenanceTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MaintenanceTasks::TaskId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MaintenanceTasks::Description).text().not_null())
                    .col(
                        ColumnDef::new(MaintenanceTasks::Priority)
                            .string_len(10)
                            .not_null()
                            .default("MEDIUM"),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::EstimatedDurationMinutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::RequiredSkills)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::RequiredParts)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::Status)
                            .string_len(20)
                            .not_null()
                            .default("PLANNED"),
                    )
                    .col(ColumnDef::new(MaintenanceTasks::Equipment).string_len(255).null())
                    .col(ColumnDef::new(MaintenanceTasks::EquipmentId).big_integer().null())
                    .col(
                        ColumnDef::new(MaintenanceTasks::AssignedTechnicianId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::CompletionPercentage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::CreationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::DueDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::LastUpdated)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceTasks::CompletionDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_tasks_status")
                    .table(MaintenanceTasks::Table)
                    .col(MaintenanceTasks::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_tasks_technician")
                    .table(MaintenanceTasks::Table)
                    .col(MaintenanceTasks::AssignedTechnicianId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceTasks::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MaintenanceTasks {
    Table,
    TaskId,
    Description,
    Priority,
    EstimatedDurationMinutes,
    RequiredSkills,
    RequiredParts,
    Status,
    Equipment,
    EquipmentId,
    AssignedTechnicianId,
    CompletionPercentage,
    CreationDate,
    DueDate,
    LastUpdated,
    CompletionDate,
}
