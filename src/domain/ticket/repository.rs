//! Ticket repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Ticket;
use crate::domain::DomainResult;

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Ticket>>;
    async fn find_by_number(&self, ticket_number: &str) -> DomainResult<Option<Ticket>>;
    async fn find_all(&self) -> DomainResult<Vec<Ticket>>;
    async fn find_by_passenger(&self, passenger_id: i64) -> DomainResult<Vec<Ticket>>;
    async fn find_by_bus(&self, bus_id: i64) -> DomainResult<Vec<Ticket>>;
    async fn find_by_driver(&self, driver_id: i64) -> DomainResult<Vec<Ticket>>;
    /// Tickets issued in `[from, to)`
    async fn find_issued_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Ticket>>;
    async fn create(&self, ticket: Ticket) -> DomainResult<Ticket>;
    async fn update(&self, ticket: Ticket) -> DomainResult<Ticket>;
}
