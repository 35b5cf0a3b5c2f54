//! Vehicle aggregate
//!
//! Fleet vehicles and their GPS location history.

pub mod model;
pub mod repository;

pub use model::{FuelType, Vehicle, VehicleLocation, VehicleStatus, MAINTENANCE_INTERVAL_DAYS};
pub use repository::{VehicleLocationRepository, VehicleRepository};
