//! Migration to create incidents and incident_tasks tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Incidents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Incidents::IncidentId)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Incidents::IncidentType)
                            .string_len(40)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Incidents::Location).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Incidents::Severity)
                            .string_len(20)
                            .not_null()
                            .default("LOW"),
                    )
                    .col(
                        ColumnDef::new(Incidents::DateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Incidents::Status)
                            .string_len(20)
                            .not_null()
                            .default("REPORTED"),
                    )
                    .col(ColumnDef::new(Incidents::Summary).text().null())
                    .col(ColumnDef::new(Incidents::BusId).big_integer().null())
                    .col(
                        ColumnDef::new(Incidents::AssignedTechnicianId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Incidents::AssignedTechnicianName)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Incidents::AssignedTeamId).big_integer().null())
                    .col(
                        ColumnDef::new(Incidents::ResolutionTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Incidents::AdditionalDetails)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_incidents_date_time")
                    .table(Incidents::Table)
                    .col(Incidents::DateTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IncidentTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IncidentTasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IncidentTasks::IncidentId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncidentTasks::TechnicianId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IncidentTasks::Description).text().not_null())
                    .col(
                        ColumnDef::new(IncidentTasks::Priority)
                            .string_len(10)
                            .not_null()
                            .default("MEDIUM"),
                    )
                    .col(
                        ColumnDef::new(IncidentTasks::Deadline)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(IncidentTasks::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(IncidentTasks::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(IncidentTasks::ProgressNotes).text().null())
                    .col(
                        ColumnDef::new(IncidentTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IncidentTasks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_incident_tasks_incident")
                            .from(IncidentTasks::Table, IncidentTasks::IncidentId)
                            .to(Incidents::Table, Incidents::IncidentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_incident_tasks_technician")
                    .table(IncidentTasks::Table)
                    .col(IncidentTasks::TechnicianId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncidentTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Incidents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Incidents {
    Table,
    IncidentId,
    IncidentType,
    Location,
    Severity,
    DateTime,
    Status,
    Summary,
    BusId,
    AssignedTechnicianId,
    AssignedTechnicianName,
    AssignedTeamId,
    ResolutionTime,
    AdditionalDetails,
}

#[derive(Iden)]
enum IncidentTasks {
    Table,
    Id,
    IncidentId,
    TechnicianId,
    Description,
    Priority,
    Deadline,
    Progress,
    Status,
    ProgressNotes,
    CreatedAt,
    UpdatedAt,
}
