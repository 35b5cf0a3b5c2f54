pub mod buses;
pub mod vehicles;

pub use buses::{BusInput, BusService};
pub use vehicles::{
    FleetStatistics, LocationFix, VehicleInput, VehicleService, DEFAULT_MINUTES_BACK,
    DEFAULT_RADIUS_KM,
};
