//! Ticket domain entity

use chrono::{DateTime, Utc};

crate::wire_enum! {
    /// Ticket lifecycle: issued, then paid, then boarded
    pub enum TicketStatus("ticket status") {
        Issued => "ISSUED",
        Paid => "PAID",
        Boarded => "BOARDED",
    }
}

impl TicketStatus {
    /// Statuses that hold a seat on the trip
    pub fn holds_seat(&self) -> bool {
        matches!(self, Self::Paid | Self::Boarded)
    }
}

/// A passenger's seat reservation on one bus trip
#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: i64,
    pub passenger_id: i64,
    pub first_name: String,
    pub last_name: String,
    /// `TKT` followed by the issue time in epoch milliseconds
    pub ticket_number: String,
    /// Eight upper-case alphanumerics
    pub reservation_code: String,
    pub seat_number: String,
    pub departure_time: DateTime<Utc>,
    pub boarding_time: Option<DateTime<Utc>>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: TicketStatus,
    /// QR payload, `{id}-{ticket_number}`
    pub qr_code: Option<String>,
    pub luggage_weight: Option<f64>,
    pub has_luggage: bool,
    pub bus_id: i64,
    pub driver_id: Option<i64>,
    pub trip_id: Option<i64>,
    pub issued_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn passenger_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn qr_payload(&self) -> String {
        format!("{}-{}", self.id, self.ticket_number)
    }

    pub fn seat(&self) -> &str {
        self.seat_number.trim()
    }
}

/// Split a QR payload `{id}-{ticket_number}` into its parts
pub fn parse_qr_payload(payload: &str) -> Option<(i64, &str)> {
    let (id, number) = payload.trim().split_once('-')?;
    let id = id.parse().ok()?;
    if number.is_empty() {
        return None;
    }
    Some((id, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_paid_and_boarded_hold_seats() {
        assert!(!TicketStatus::Issued.holds_seat());
        assert!(TicketStatus::Paid.holds_seat());
        assert!(TicketStatus::Boarded.holds_seat());
    }

    #[test]
    fn qr_payload_parsing() {
        assert_eq!(parse_qr_payload("17-TKT1700000000000"), Some((17, "TKT1700000000000")));
        assert_eq!(parse_qr_payload("abc-TKT1"), None);
        assert_eq!(parse_qr_payload("17-"), None);
        assert_eq!(parse_qr_payload("17"), None);
    }
}
