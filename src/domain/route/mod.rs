//! Route aggregate
//!
//! Routes and their ordered stops.

pub mod model;
pub mod repository;

pub use model::{next_sequence_order, Route, RouteType, Stop};
pub use repository::{RouteRepository, StopRepository};
