//! Spare part aggregate

pub mod model;
pub mod repository;

pub use model::SparePart;
pub use repository::SparePartRepository;
