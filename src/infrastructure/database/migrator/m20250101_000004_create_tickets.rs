//! Migration to create tickets table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tickets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tickets::PassengerId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Tickets::LastName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Tickets::TicketNumber)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Tickets::ReservationCode)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Tickets::SeatNumber).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Tickets::DepartureTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::BoardingTime)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Tickets::Origin).string_len(255).null())
                    .col(ColumnDef::new(Tickets::Destination).string_len(255).null())
                    .col(
                        ColumnDef::new(Tickets::Status)
                            .string_len(20)
                            .not_null()
                            .default("ISSUED"),
                    )
                    .col(ColumnDef::new(Tickets::QrCode).text().null())
                    .col(ColumnDef::new(Tickets::LuggageWeight).double().null())
                    .col(
                        ColumnDef::new(Tickets::HasLuggage)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tickets::BusId).big_integer().not_null())
                    .col(ColumnDef::new(Tickets::DriverId).big_integer().null())
                    .col(ColumnDef::new(Tickets::TripId).big_integer().null())
                    .col(
                        ColumnDef::new(Tickets::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tickets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_bus")
                            .from(Tickets::Table, Tickets::BusId)
                            .to(Buses::Table, Buses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_bus_id")
                    .table(Tickets::Table)
                    .col(Tickets::BusId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tickets_passenger_id")
                    .table(Tickets::Table)
                    .col(Tickets::PassengerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tickets {
    Table,
    Id,
    PassengerId,
    FirstName,
    LastName,
    TicketNumber,
    ReservationCode,
    SeatNumber,
    DepartureTime,
    BoardingTime,
    Origin,
    Destination,
    Status,
    QrCode,
    LuggageWeight,
    HasLuggage,
    BusId,
    DriverId,
    TripId,
    IssuedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Buses {
    Table,
    Id,
}
