//! Tickets module: seat checks, booking, QR boarding, fares

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
