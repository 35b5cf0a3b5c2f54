//! Migration to create routes and stops tables

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Routes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Routes::RouteName).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Routes::RouteCode)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Routes::Description).text().null())
                    .col(ColumnDef::new(Routes::TotalDistance).double().null())
                    .col(ColumnDef::new(Routes::EstimatedDuration).integer().null())
                    .col(ColumnDef::new(Routes::Color).string_len(20).null())
                    .col(
                        ColumnDef::new(Routes::RouteType)
                            .string_len(20)
                            .not_null()
                            .default("URBAN"),
                    )
                    .col(
                        ColumnDef::new(Routes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Routes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Routes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stops::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Stops::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Stops::RouteId).big_integer().not_null())
                    .col(ColumnDef::new(Stops::StopName).string_len(255).not_null())
                    .col(ColumnDef::new(Stops::StopCode).string_len(50).null())
                    .col(ColumnDef::new(Stops::Latitude).double().not_null())
                    .col(ColumnDef::new(Stops::Longitude).double().not_null())
                    .col(ColumnDef::new(Stops::SequenceOrder).integer().not_null())
                    .col(
                        ColumnDef::new(Stops::HasShelter)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Stops::IsAccessible)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Stops::Zone).string_len(50).null())
                    .col(
                        ColumnDef::new(Stops::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stops_route")
                            .from(Stops::Table, Stops::RouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stops_route_sequence")
                    .table(Stops::Table)
                    .col(Stops::RouteId)
                    .col(Stops::SequenceOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stops::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Routes {
    Table,
    Id,
    RouteName,
    RouteCode,
    Description,
    TotalDistance,
    EstimatedDuration,
    Color,
    RouteType,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Stops {
    Table,
    Id,
    RouteId,
    StopName,
    StopCode,
    Latitude,
    Longitude,
    SequenceOrder,
    HasShelter,
    IsAccessible,
    Zone,
    IsActive,
}
