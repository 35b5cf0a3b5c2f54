//! Migration to create vehicles and vehicle_locations tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::VehicleNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::LicensePlate)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Capacity).integer().not_null())
                    .col(ColumnDef::new(Vehicles::VehicleType).string_len(50).null())
                    .col(
                        ColumnDef::new(Vehicles::IsAccessible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Vehicles::Status)
                            .string_len(20)
                            .not_null()
                            .default("INACTIVE"),
                    )
                    .col(ColumnDef::new(Vehicles::Manufacturer).string_len(100).null())
                    .col(ColumnDef::new(Vehicles::Model).string_len(100).null())
                    .col(ColumnDef::new(Vehicles::Year).integer().null())
                    .col(ColumnDef::new(Vehicles::FuelType).string_len(20).null())
                    .col(
                        ColumnDef::new(Vehicles::HasAirConditioning)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Vehicles::HasWifi)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Vehicles::HasGps)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Vehicles::OdometerReading).double().null())
                    .col(
                        ColumnDef::new(Vehicles::LastMaintenance)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::NextMaintenance)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CurrentPassengers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Vehicles::RouteId).big_integer().null())
                    .col(
                        ColumnDef::new(Vehicles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleLocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VehicleLocations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VehicleLocations::VehicleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VehicleLocations::Latitude).double().not_null())
                    .col(ColumnDef::new(VehicleLocations::Longitude).double().not_null())
                    .col(ColumnDef::new(VehicleLocations::Speed).double().null())
                    .col(ColumnDef::new(VehicleLocations::Heading).double().null())
                    .col(
                        ColumnDef::new(VehicleLocations::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicle_locations_vehicle")
                            .from(VehicleLocations::Table, VehicleLocations::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicle_locations_vehicle_time")
                    .table(VehicleLocations::Table)
                    .col(VehicleLocations::VehicleId)
                    .col(VehicleLocations::RecordedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VehicleLocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Vehicles {
    Table,
    Id,
    VehicleNumber,
    LicensePlate,
    Capacity,
    VehicleType,
    IsAccessible,
    Status,
    Manufacturer,
    Model,
    Year,
    FuelType,
    HasAirConditioning,
    HasWifi,
    HasGps,
    OdometerReading,
    LastMaintenance,
    NextMaintenance,
    CurrentPassengers,
    RouteId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum VehicleLocations {
    Table,
    Id,
    VehicleId,
    Latitude,
    Longitude,
    Speed,
    Heading,
    RecordedAt,
}
