//! Traffic data aggregate

pub mod model;
pub mod repository;

pub use model::{level_description, TrafficData, TrafficQuery};
pub use repository::TrafficDataRepository;
