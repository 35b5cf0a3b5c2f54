//! Ticket aggregate

pub mod model;
pub mod repository;

pub use model::{parse_qr_payload, Ticket, TicketStatus};
pub use repository::TicketRepository;
