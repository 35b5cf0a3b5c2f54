//! Ticketing: fares, seat availability, booking and boarding

pub mod pricing;
pub mod service;

pub use pricing::{PriceQuote, CURRENCY};
pub use service::{
    BookingError, BookingRejection, IssuedTicket, NewTicket, ReminderSummary, ScanOutcome,
    SeatCheck, TicketService, TripQuery,
};
