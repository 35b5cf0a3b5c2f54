//! Vehicles module: fleet records, breakdowns, GPS fixes

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
