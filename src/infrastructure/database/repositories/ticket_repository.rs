//! SeaORM implementation of TicketRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::{db_err, write_err};
use crate::domain::ticket::{Ticket, TicketRepository, TicketStatus};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::ticket;

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_where(
        &self,
        filter: sea_orm::sea_query::SimpleExpr,
    ) -> DomainResult<Vec<Ticket>> {
        let models = ticket::Entity::find()
            .filter(filter)
            .order_by_asc(ticket::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

fn model_to_domain(m: ticket::Model) -> Ticket {
    Ticket {
        id: m.id,
        passenger_id: m.passenger_id,
        first_name: m.first_name,
        last_name: m.last_name,
        ticket_number: m.ticket_number,
        reservation_code: m.reservation_code,
        seat_number: m.seat_number,
        departure_time: m.departure_time,
        boarding_time: m.boarding_time,
        origin: m.origin,
        destination: m.destination,
        status: TicketStatus::from_str(&m.status).unwrap_or(TicketStatus::Issued),
        qr_code: m.qr_code,
        luggage_weight: m.luggage_weight,
        has_luggage: m.has_luggage,
        bus_id: m.bus_id,
        driver_id: m.driver_id,
        trip_id: m.trip_id,
        issued_at: m.issued_at,
        updated_at: m.updated_at,
    }
}

fn domain_to_active(t: Ticket) -> ticket::ActiveModel {
    ticket::ActiveModel {
        id: if t.id > 0 { Set(t.id) } else { NotSet },
        passenger_id: Set(t.passenger_id),
        first_name: Set(t.first_name),
        last_name: Set(t.last_name),
        ticket_number: Set(t.ticket_number),
        reservation_code: Set(t.reservation_code),
        seat_number: Set(t.seat_number),
        departure_time: Set(t.departure_time),
        boarding_time: Set(t.boarding_time),
        origin: Set(t.origin),
        destination: Set(t.destination),
        status: Set(t.status.as_str().to_string()),
        qr_code: Set(t.qr_code),
        luggage_weight: Set(t.luggage_weight),
        has_luggage: Set(t.has_luggage),
        bus_id: Set(t.bus_id),
        driver_id: Set(t.driver_id),
        trip_id: Set(t.trip_id),
        issued_at: Set(t.issued_at),
        updated_at: Set(t.updated_at),
    }
}

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Ticket>> {
        let m = ticket::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_by_number(&self, ticket_number: &str) -> DomainResult<Option<Ticket>> {
        let m = ticket::Entity::find()
            .filter(ticket::Column::TicketNumber.eq(ticket_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(m.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Ticket>> {
        let models = ticket::Entity::find()
            .order_by_desc(ticket::Column::IssuedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_passenger(&self, passenger_id: i64) -> DomainResult<Vec<Ticket>> {
        self.find_where(ticket::Column::PassengerId.eq(passenger_id))
            .await
    }

    async fn find_by_bus(&self, bus_id: i64) -> DomainResult<Vec<Ticket>> {
        self.find_where(ticket::Column::BusId.eq(bus_id)).await
    }

    async fn find_by_driver(&self, driver_id: i64) -> DomainResult<Vec<Ticket>> {
        self.find_where(ticket::Column::DriverId.eq(driver_id)).await
    }

    async fn find_issued_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Ticket>> {
        self.find_where(ticket::Column::IssuedAt.between(from, to))
            .await
    }

    async fn create(&self, mut t: Ticket) -> DomainResult<Ticket> {
        t.id = 0;
        let model = domain_to_active(t)
            .insert(&self.db)
            .await
            .map_err(write_err("Ticket"))?;
        debug!(
            "Created ticket {} seat {} on bus {}",
            model.ticket_number, model.seat_number, model.bus_id
        );
        Ok(model_to_domain(model))
    }

    async fn update(&self, t: Ticket) -> DomainResult<Ticket> {
        let model = domain_to_active(t)
            .update(&self.db)
            .await
            .map_err(write_err("Ticket"))?;
        Ok(model_to_domain(model))
    }
}
