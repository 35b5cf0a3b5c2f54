//! Bus aggregate

pub mod model;
pub mod repository;

pub use model::Bus;
pub use repository::BusRepository;
