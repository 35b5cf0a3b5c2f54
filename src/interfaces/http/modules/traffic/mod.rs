//! Traffic-data module: ingestion, geographic queries, aggregates

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
