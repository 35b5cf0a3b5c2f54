//! Migration to create bus_schedules table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BusSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BusSchedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BusSchedules::BusId).big_integer().not_null())
                    .col(ColumnDef::new(BusSchedules::DriverId).big_integer().not_null())
                    .col(ColumnDef::new(BusSchedules::RouteId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BusSchedules::DayOfWeek)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusSchedules::DepartureTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusSchedules::ArrivalTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusSchedules::EstimatedDurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusSchedules::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BusSchedules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BusSchedules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bus_schedules_bus_id")
                    .table(BusSchedules::Table)
                    .col(BusSchedules::BusId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BusSchedules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum BusSchedules {
    Table,
    Id,
    BusId,
    DriverId,
    RouteId,
    DayOfWeek,
    DepartureTime,
    ArrivalTime,
    EstimatedDurationMinutes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
