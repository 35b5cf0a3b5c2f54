//! Migration to create traffic_data table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrafficData::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrafficData::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrafficData::Latitude).double().not_null())
                    .col(ColumnDef::new(TrafficData::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(TrafficData::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TrafficData::TrafficLevel).integer().not_null())
                    .col(ColumnDef::new(TrafficData::AverageSpeed).double().null())
                    .col(
                        ColumnDef::new(TrafficData::WeatherCondition)
                            .string_len(50)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TrafficData::IsHoliday)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(TrafficData::DayOfWeek).integer().not_null())
                    .col(ColumnDef::new(TrafficData::HourOfDay).integer().not_null())
                    .col(ColumnDef::new(TrafficData::VehicleCount).integer().null())
                    .col(ColumnDef::new(TrafficData::Visibility).double().null())
                    .col(ColumnDef::new(TrafficData::Temperature).double().null())
                    .col(ColumnDef::new(TrafficData::Humidity).double().null())
                    .col(ColumnDef::new(TrafficData::RoadType).string_len(50).null())
                    .col(ColumnDef::new(TrafficData::EventType).string_len(50).null())
                    .col(
                        ColumnDef::new(TrafficData::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrafficData::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_traffic_data_timestamp")
                    .table(TrafficData::Table)
                    .col(TrafficData::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_traffic_data_position")
                    .table(TrafficData::Table)
                    .col(TrafficData::Latitude)
                    .col(TrafficData::Longitude)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TrafficData::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TrafficData {
    Table,
    Id,
    Latitude,
    Longitude,
    Timestamp,
    TrafficLevel,
    AverageSpeed,
    WeatherCondition,
    IsHoliday,
    DayOfWeek,
    HourOfDay,
    VehicleCount,
    Visibility,
    Temperature,
    Humidity,
    RoadType,
    EventType,
    CreatedAt,
    UpdatedAt,
}
