//! Bus schedule aggregate

pub mod model;
pub mod repository;

pub use model::{default_arrival, DayOfWeek, Schedule};
pub use repository::ScheduleRepository;
