//! Domain layer
//!
//! Aggregates (model + repository trait), domain events and the
//! `RepositoryProvider` that ties the repositories together.

#[macro_use]
pub mod enums;

pub mod bus;
pub mod emergency;
pub mod equipment;
pub mod events;
pub mod incident;
pub mod maintenance;
pub mod notification;
pub mod repositories;
pub mod route;
pub mod schedule;
pub mod spare_part;
pub mod staff;
pub mod ticket;
pub mod traffic;
pub mod vehicle;

pub use repositories::{DomainResult, RepositoryProvider};

pub use crate::shared::errors::DomainError;
