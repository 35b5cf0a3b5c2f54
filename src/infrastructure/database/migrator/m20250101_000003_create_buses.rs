//! Migration to create buses table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Buses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Buses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Buses::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Buses::BusLine).string_len(50).null())
                    .col(ColumnDef::new(Buses::Capacity).integer().not_null())
                    .col(ColumnDef::new(Buses::StartLat).double().null())
                    .col(ColumnDef::new(Buses::StartLng).double().null())
                    .col(ColumnDef::new(Buses::EndLat).double().null())
                    .col(ColumnDef::new(Buses::EndLng).double().null())
                    .col(ColumnDef::new(Buses::CurrentLat).double().null())
                    .col(ColumnDef::new(Buses::CurrentLng).double().null())
                    .col(
                        ColumnDef::new(Buses::Passengers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Buses::Progress)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Buses::IsStopped)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Buses::HasAccident)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Buses::DepartureTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Buses::ArrivalTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Buses::DriverId).big_integer().null())
                    .col(ColumnDef::new(Buses::RouteId).big_integer().null())
                    .col(
                        ColumnDef::new(Buses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buses_driver")
                            .from(Buses::Table, Buses::DriverId)
                            .to(Staff::Table, Staff::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buses_route")
                            .from(Buses::Table, Buses::RouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_buses_driver_id")
                    .table(Buses::Table)
                    .col(Buses::DriverId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Buses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Buses {
    Table,
    Id,
    Name,
    BusLine,
    Capacity,
    StartLat,
    StartLng,
    EndLat,
    EndLng,
    CurrentLat,
    CurrentLng,
    Passengers,
    Progress,
    IsStopped,
    HasAccident,
    DepartureTime,
    ArrivalTime,
    DriverId,
    RouteId,
    CreatedAt,
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
}

#[derive(Iden)]
enum Routes {
    Table,
    Id,
}
