//! Staff aggregate
//!
//! System users and their roles.

pub mod model;
pub mod repository;

pub use model::{Staff, StaffRole};
pub use repository::StaffRepository;
