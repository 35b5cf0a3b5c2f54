pub mod routes;
pub mod schedules;

pub use routes::{RouteInput, RouteService, StopInput};
pub use schedules::{ScheduleInput, ScheduleService};
