//! Incidents module: reporting, assignment, statistics

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
