//! Ticket booking, seat availability and boarding

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{info, warn};

use super::pricing::{self, PriceQuote};
use crate::application::events::{Event, SharedEventBus, TicketBoardedEvent, TicketIssuedEvent};
use crate::application::notifications::NotificationService;
use crate::domain::bus::Bus;
use crate::domain::staff::StaffRole;
use crate::domain::ticket::{parse_qr_payload, Ticket, TicketStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::reservation_code;
use crate::shared::{format_short, minutes_between, non_blank};

/// Minutes between boarding opening and departure
const BOARDING_LEAD_MINUTES: i64 = 30;
/// A ticket can still be scanned this long after departure
const SCAN_GRACE_HOURS: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    SeatTaken,
    BusFull,
}

impl BookingRejection {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SeatTaken => "SEAT_ALREADY_TAKEN",
            Self::BusFull => "BUS_FULL",
        }
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{message}")]
    Rejected {
        reason: BookingRejection,
        message: String,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One bus departure, optionally narrowed to an origin/destination pair
#[derive(Debug, Clone)]
pub struct TripQuery {
    pub bus_id: i64,
    pub departure_time: DateTime<Utc>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl TripQuery {
    /// Same departure (to the minute), same endpoints when given, and the
    /// ticket holds its seat
    pub fn includes(&self, ticket: &Ticket) -> bool {
        let same_time = minutes_between(ticket.departure_time, self.departure_time).abs() < 1;
        let same_origin = self
            .origin
            .as_deref()
            .map_or(true, |o| ticket.origin.as_deref() == Some(o));
        let same_destination = self
            .destination
            .as_deref()
            .map_or(true, |d| ticket.destination.as_deref() == Some(d));
        ticket.bus_id == self.bus_id
            && same_time
            && same_origin
            && same_destination
            && ticket.status.holds_seat()
    }

    pub fn seat_taken(&self, tickets: &[Ticket], seat: &str) -> bool {
        let seat = seat.trim();
        tickets.iter().any(|t| self.includes(t) && t.seat() == seat)
    }
}

/// Numeric seats ascending, then anything else lexicographically
pub fn compare_seats(a: &str, b: &str) -> Ordering {
    match (a.parse::<u32>(), b.parse::<u32>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[derive(Debug, Clone)]
pub struct SeatCheck {
    pub available: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub bus_id: Option<i64>,
    pub passenger_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub seat_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<DateTime<Utc>>,
    pub has_luggage: bool,
    pub luggage_weight: Option<f64>,
    pub driver_id: Option<i64>,
    pub trip_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct IssuedTicket {
    pub ticket: Ticket,
    pub payment_amount: f64,
    pub qr_data: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum ScanOutcome {
    Boarded(Ticket),
    Rejected(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ReminderSummary {
    pub total_tickets: usize,
    pub reminders_sent: usize,
    pub minutes_before: i64,
}

pub struct TicketService {
    repos: Arc<dyn RepositoryProvider>,
    notifications: Arc<NotificationService>,
    event_bus: SharedEventBus,
}

impl TicketService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        notifications: Arc<NotificationService>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            notifications,
            event_bus,
        }
    }

    async fn bus_for_booking(&self, bus_id: i64) -> DomainResult<Bus> {
        self.repos
            .buses()
            .find_by_id(bus_id)
            .await?
            .ok_or_else(|| DomainError::Validation(format!("Bus not found with ID: {}", bus_id)))
    }

    pub async fn validate_seat(&self, trip: &TripQuery, seat_number: &str) -> DomainResult<SeatCheck> {
        let bus = self.bus_for_booking(trip.bus_id).await?;
        let seat = seat_number.trim();
        let number: u32 = seat
            .parse()
            .map_err(|_| DomainError::Validation(format!("Invalid seat number format: {}", seat)))?;
        if !bus.has_seat(number) {
            return Err(DomainError::Validation(format!(
                "Seat number {} is invalid for this bus (capacity: {})",
                number, bus.capacity
            )));
        }

        let tickets = self.repos.tickets().find_by_bus(trip.bus_id).await?;
        if trip.seat_taken(&tickets, seat) {
            return Ok(SeatCheck {
                available: false,
                message: format!("Seat {} is already taken for this trip", seat),
            });
        }
        Ok(SeatCheck {
            available: true,
            message: format!("Seat {} is available for this trip", seat),
        })
    }

    pub async fn trip_tickets(&self, trip: &TripQuery) -> DomainResult<Vec<Ticket>> {
        let tickets = self.repos.tickets().find_by_bus(trip.bus_id).await?;
        Ok(tickets.into_iter().filter(|t| trip.includes(t)).collect())
    }

    pub async fn taken_seats(&self, trip: &TripQuery) -> DomainResult<Vec<String>> {
        let mut seats: Vec<String> = self
            .trip_tickets(trip)
            .await?
            .iter()
            .map(|t| t.seat().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        seats.sort_by(|a, b| compare_seats(a, b));
        Ok(seats)
    }

    pub async fn book(&self, input: NewTicket) -> Result<IssuedTicket, BookingError> {
        let bus_id = input
            .bus_id
            .ok_or_else(|| DomainError::Validation("Bus ID is required".into()))?;
        let passenger_id = input
            .passenger_id
            .ok_or_else(|| DomainError::Validation("Passenger ID is required".into()))?;
        let first_name = non_blank(input.first_name.as_deref())
            .ok_or_else(|| DomainError::Validation("First name is required".into()))?
            .to_string();
        let last_name = non_blank(input.last_name.as_deref())
            .ok_or_else(|| DomainError::Validation("Last name is required".into()))?
            .to_string();
        let seat = non_blank(input.seat_number.as_deref())
            .ok_or_else(|| DomainError::Validation("Seat number is required".into()))?
            .to_string();

        let mut bus = self.bus_for_booking(bus_id).await?;
        if bus.has_accident {
            return Err(DomainError::Validation(
                "Cannot create ticket for a bus that has an accident".into(),
            )
            .into());
        }

        let now = Utc::now();
        let departure = input
            .departure_time
            .or(bus.departure_time)
            .unwrap_or_else(|| now + Duration::hours(1));
        let trip = TripQuery {
            bus_id,
            departure_time: departure,
            origin: input.origin.clone(),
            destination: input.destination.clone(),
        };

        let existing = self.repos.tickets().find_by_bus(bus_id).await?;
        if trip.seat_taken(&existing, &seat) {
            warn!(bus_id, seat = %seat, departure = %departure, "Attempt to book a taken seat");
            return Err(BookingError::Rejected {
                reason: BookingRejection::SeatTaken,
                message: format!(
                    "Seat {} is already taken for this trip. Please select another seat.",
                    seat
                ),
            });
        }
        let on_board = existing.iter().filter(|t| trip.includes(t)).count();
        if on_board >= usize::try_from(bus.capacity).unwrap_or(0) {
            return Err(BookingError::Rejected {
                reason: BookingRejection::BusFull,
                message: format!(
                    "Bus is full for this trip. Current passengers: {}/{}",
                    on_board, bus.capacity
                ),
            });
        }

        let ticket = Ticket {
            id: 0,
            passenger_id,
            first_name,
            last_name,
            ticket_number: self.next_ticket_number(now).await?,
            reservation_code: reservation_code(),
            seat_number: seat,
            departure_time: departure,
            boarding_time: Some(departure - Duration::minutes(BOARDING_LEAD_MINUTES)),
            origin: input.origin,
            destination: input.destination,
            status: TicketStatus::Paid,
            qr_code: None,
            luggage_weight: Some(input.luggage_weight.unwrap_or(0.0)),
            has_luggage: input.has_luggage,
            bus_id,
            driver_id: input.driver_id.or(bus.driver_id),
            trip_id: input.trip_id,
            issued_at: now,
            updated_at: now,
        };
        let mut ticket = self.repos.tickets().create(ticket).await?;
        ticket.qr_code = Some(ticket.qr_payload());
        let ticket = self.repos.tickets().update(ticket).await?;

        bus.passengers += 1;
        if let Err(e) = self.repos.buses().update(bus.clone()).await {
            warn!(bus_id, error = %e, "Failed to update bus passenger count");
        }
        metrics::counter!("transit_tickets_sold_total").increment(1);
        info!(ticket_id = ticket.id, seat = %ticket.seat_number, bus_id, "Ticket issued");

        self.event_bus.publish(Event::TicketIssued(TicketIssuedEvent {
            ticket_id: ticket.id,
            ticket_number: ticket.ticket_number.clone(),
            bus_id,
            passenger_id,
            seat_number: ticket.seat_number.clone(),
            departure_time: ticket.departure_time,
        }));
        self.announce_purchase(&ticket, &bus).await;

        let quote = pricing::quote(
            ticket.origin.as_deref(),
            ticket.destination.as_deref(),
            ticket.has_luggage,
        );
        Ok(IssuedTicket {
            payment_amount: quote.total_price,
            qr_data: ticket.qr_payload(),
            message: format!("Ticket created successfully for seat {}", ticket.seat_number),
            ticket,
        })
    }

    /// `TKT` + epoch millis, bumped past any number already issued
    async fn next_ticket_number(&self, now: DateTime<Utc>) -> DomainResult<String> {
        let mut millis = now.timestamp_millis();
        loop {
            let candidate = format!("TKT{}", millis);
            if self.repos.tickets().find_by_number(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            millis += 1;
        }
    }

    async fn announce_purchase(&self, ticket: &Ticket, bus: &Bus) {
        let message = format!(
            "Your ticket {} for seat {} on bus {} departing at {} is confirmed.",
            ticket.ticket_number,
            ticket.seat_number,
            bus.name,
            format_short(ticket.departure_time)
        );
        self.notifications
            .notify(
                ticket.passenger_id,
                StaffRole::Passenger.as_str(),
                &message,
                "TICKET_PURCHASE",
            )
            .await;

        if let Some(driver_id) = ticket.driver_id {
            let message = format!(
                "New passenger {} booked seat {} for the {} departure.",
                ticket.passenger_name(),
                ticket.seat_number,
                format_short(ticket.departure_time)
            );
            self.notifications
                .notify(driver_id, StaffRole::Driver.as_str(), &message, "NEW_PASSENGER")
                .await;
        }
    }

    pub fn quote(&self, origin: Option<&str>, destination: Option<&str>, has_luggage: bool) -> PriceQuote {
        pricing::quote(origin, destination, has_luggage)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Ticket> {
        self.repos
            .tickets()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", "id", id))
    }

    pub async fn get_by_number(&self, number: &str) -> DomainResult<Ticket> {
        self.repos
            .tickets()
            .find_by_number(number)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", "ticketNumber", number))
    }

    pub async fn list(&self) -> DomainResult<Vec<Ticket>> {
        self.repos.tickets().find_all().await
    }

    pub async fn for_passenger(&self, passenger_id: i64) -> DomainResult<Vec<Ticket>> {
        self.repos.tickets().find_by_passenger(passenger_id).await
    }

    pub async fn for_bus(&self, bus_id: i64) -> DomainResult<Vec<Ticket>> {
        self.repos.tickets().find_by_bus(bus_id).await
    }

    /// (Re)write the QR payload of a ticket
    pub async fn generate_qr(&self, id: i64) -> DomainResult<Ticket> {
        let mut ticket = self.get(id).await?;
        if ticket.ticket_number.trim().is_empty() {
            return Err(DomainError::Validation(
                "Cannot generate QR code: Ticket number is missing".into(),
            ));
        }
        ticket.qr_code = Some(ticket.qr_payload());
        ticket.updated_at = Utc::now();
        self.repos.tickets().update(ticket).await
    }

    pub async fn scan(&self, qr_data: &str) -> DomainResult<ScanOutcome> {
        let qr_data = qr_data.trim();
        if qr_data.is_empty() {
            return Err(DomainError::Validation("QR data cannot be empty".into()));
        }
        let (id, number) = parse_qr_payload(qr_data)
            .ok_or_else(|| DomainError::Validation(format!("Invalid QR code: {}", qr_data)))?;
        let ticket = self
            .repos
            .tickets()
            .find_by_id(id)
            .await?
            .filter(|t| t.ticket_number == number)
            .ok_or_else(|| DomainError::not_found("Ticket", "qrData", qr_data))?;

        self.board(ticket, Utc::now()).await
    }

    async fn board(&self, mut ticket: Ticket, now: DateTime<Utc>) -> DomainResult<ScanOutcome> {
        match ticket.status {
            TicketStatus::Boarded => return Ok(ScanOutcome::Rejected("Ticket already used")),
            TicketStatus::Issued => return Ok(ScanOutcome::Rejected("Ticket not paid")),
            TicketStatus::Paid => {}
        }
        if now > ticket.departure_time + Duration::hours(SCAN_GRACE_HOURS) {
            return Ok(ScanOutcome::Rejected("Departure time has passed"));
        }

        ticket.status = TicketStatus::Boarded;
        ticket.boarding_time = Some(now);
        ticket.updated_at = now;
        let ticket = self.repos.tickets().update(ticket).await?;

        info!(ticket_id = ticket.id, "Ticket scanned, passenger boarded");
        self.event_bus.publish(Event::TicketBoarded(TicketBoardedEvent {
            ticket_id: ticket.id,
            ticket_number: ticket.ticket_number.clone(),
            bus_id: ticket.bus_id,
            boarded_at: now,
        }));
        Ok(ScanOutcome::Boarded(ticket))
    }

    pub async fn send_departure_reminders(
        &self,
        bus_id: i64,
        departure: DateTime<Utc>,
        minutes_before: i64,
    ) -> DomainResult<ReminderSummary> {
        let tickets: Vec<Ticket> = self
            .repos
            .tickets()
            .find_by_bus(bus_id)
            .await?
            .into_iter()
            .filter(|t| {
                t.status == TicketStatus::Paid
                    && minutes_between(t.departure_time, departure).abs() < 1
            })
            .collect();

        let mut sent = 0;
        for ticket in &tickets {
            let message = format!(
                "Reminder: your bus departs in {} minutes ({}). Seat {}, ticket {}.",
                minutes_before,
                format_short(ticket.departure_time),
                ticket.seat_number,
                ticket.ticket_number
            );
            if self
                .notifications
                .notify(
                    ticket.passenger_id,
                    StaffRole::Passenger.as_str(),
                    &message,
                    "DEPARTURE_REMINDER",
                )
                .await
            {
                sent += 1;
            }
        }

        info!(bus_id, total = tickets.len(), sent, "Departure reminders sent");
        Ok(ReminderSummary {
            total_tickets: tickets.len(),
            reminders_sent: sent,
            minutes_before,
        })
    }

    /// Distinct (bus, departure) pairs among the driver's tickets
    pub async fn driver_trip_count(&self, driver_id: i64) -> DomainResult<usize> {
        let tickets = self.repos.tickets().find_by_driver(driver_id).await?;
        let trips: HashSet<(i64, i64)> = tickets
            .iter()
            .map(|t| (t.bus_id, t.departure_time.timestamp()))
            .collect();
        Ok(trips.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::EventBus;
    use crate::test_support::{repositories, seed_staff};
    use chrono::TimeZone;

    struct Fixture {
        svc: TicketService,
        repos: Arc<dyn RepositoryProvider>,
        bus: Bus,
        passenger_id: i64,
    }

    async fn fixture(capacity: i32) -> Fixture {
        let repos = repositories().await;
        let event_bus = Arc::new(EventBus::new());
        let notifications = Arc::new(NotificationService::new(repos.clone(), event_bus.clone()));
        let passenger = seed_staff(repos.as_ref(), "rider@imas.cd", StaffRole::Passenger).await;
        let bus = repos.buses().create(Bus::new("B-1", capacity)).await.unwrap();
        Fixture {
            svc: TicketService::new(repos.clone(), notifications, event_bus),
            repos,
            bus,
            passenger_id: passenger.id,
        }
    }

    fn departure() -> DateTime<Utc> {
        Utc::now() + Duration::hours(3)
    }

    fn request(f: &Fixture, seat: &str, at: DateTime<Utc>) -> NewTicket {
        NewTicket {
            bus_id: Some(f.bus.id),
            passenger_id: Some(f.passenger_id),
            first_name: Some("Jean".into()),
            last_name: Some("Kabila".into()),
            seat_number: Some(seat.into()),
            origin: Some("Gare Centrale".into()),
            destination: Some("Matete".into()),
            departure_time: Some(at),
            ..Default::default()
        }
    }

    fn ticket_at(bus_id: i64, seat: &str, at: DateTime<Utc>, status: TicketStatus) -> Ticket {
        Ticket {
            id: 1,
            passenger_id: 1,
            first_name: "A".into(),
            last_name: "B".into(),
            ticket_number: "TKT1".into(),
            reservation_code: "ABCDEFGH".into(),
            seat_number: seat.into(),
            departure_time: at,
            boarding_time: None,
            origin: Some("X".into()),
            destination: Some("Y".into()),
            status,
            qr_code: None,
            luggage_weight: None,
            has_luggage: false,
            bus_id,
            driver_id: None,
            trip_id: None,
            issued_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn conflict_rules() {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
        let trip = TripQuery {
            bus_id: 1,
            departure_time: at + Duration::seconds(30),
            origin: Some("X".into()),
            destination: None,
        };
        let paid = ticket_at(1, " 4 ", at, TicketStatus::Paid);
        assert!(trip.seat_taken(std::slice::from_ref(&paid), "4"));
        assert!(!trip.seat_taken(&[ticket_at(1, "4", at, TicketStatus::Issued)], "4"));
        assert!(!trip.seat_taken(&[ticket_at(2, "4", at, TicketStatus::Paid)], "4"));
        assert!(!trip.seat_taken(
            &[ticket_at(1, "4", at + Duration::minutes(2), TicketStatus::Boarded)],
            "4"
        ));

        let other_origin = TripQuery {
            origin: Some("Z".into()),
            ..trip.clone()
        };
        assert!(!other_origin.seat_taken(&[paid], "4"));
    }

    #[test]
    fn seats_sort_numerically_then_lexically() {
        let mut seats = vec!["10", "B2", "2", "A1", "1"];
        seats.sort_by(|a, b| compare_seats(a, b));
        assert_eq!(seats, vec!["1", "2", "10", "A1", "B2"]);
    }

    #[tokio::test]
    async fn booking_then_double_booking() {
        let f = fixture(40).await;
        let at = departure();

        let issued = f.svc.book(request(&f, "12", at)).await.unwrap();
        assert_eq!(issued.ticket.status, TicketStatus::Paid);
        assert_eq!(issued.ticket.boarding_time, Some(at - Duration::minutes(30)));
        assert_eq!(issued.qr_data, format!("{}-{}", issued.ticket.id, issued.ticket.ticket_number));
        assert!((issued.payment_amount - 2400.0).abs() < 1e-9);
        assert_eq!(issued.ticket.reservation_code.len(), 8);

        let bus = f.repos.buses().find_by_id(f.bus.id).await.unwrap().unwrap();
        assert_eq!(bus.passengers, 1);

        match f.svc.book(request(&f, " 12", at)).await {
            Err(BookingError::Rejected { reason, .. }) => assert_eq!(reason, BookingRejection::SeatTaken),
            other => panic!("unexpected: {:?}", other.map(|t| t.ticket.id)),
        }

        let trip = TripQuery {
            bus_id: f.bus.id,
            departure_time: at,
            origin: None,
            destination: None,
        };
        let check = f.svc.validate_seat(&trip, "12").await.unwrap();
        assert!(!check.available);
        assert!(f.svc.validate_seat(&trip, "13").await.unwrap().available);
        assert!(f.svc.validate_seat(&trip, "41").await.is_err());
        assert!(f.svc.validate_seat(&trip, "x").await.is_err());
    }

    #[tokio::test]
    async fn full_bus_is_rejected() {
        let f = fixture(1).await;
        let at = departure();
        f.svc.book(request(&f, "1", at)).await.unwrap();
        match f.svc.book(request(&f, "2", at)).await {
            Err(BookingError::Rejected { reason, .. }) => assert_eq!(reason, BookingRejection::BusFull),
            other => panic!("unexpected: {:?}", other.map(|t| t.ticket.id)),
        }
    }

    #[tokio::test]
    async fn accident_buses_and_missing_fields_are_rejected() {
        let f = fixture(10).await;
        let mut req = request(&f, "1", departure());
        req.first_name = Some("  ".into());
        assert!(matches!(f.svc.book(req).await, Err(BookingError::Domain(DomainError::Validation(_)))));

        let mut bus = f.bus.clone();
        bus.has_accident = true;
        f.repos.buses().update(bus).await.unwrap();
        assert!(matches!(
            f.svc.book(request(&f, "1", departure())).await,
            Err(BookingError::Domain(DomainError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn scan_outcomes() {
        let f = fixture(10).await;
        let issued = f.svc.book(request(&f, "3", departure())).await.unwrap();

        match f.svc.scan(&issued.qr_data).await.unwrap() {
            ScanOutcome::Boarded(t) => assert_eq!(t.status, TicketStatus::Boarded),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            f.svc.scan(&issued.qr_data).await.unwrap(),
            ScanOutcome::Rejected("Ticket already used")
        ));
        assert!(matches!(
            f.svc.scan("999-TKT0").await,
            Err(DomainError::NotFound { .. })
        ));

        let late = f
            .svc
            .book(request(&f, "4", Utc::now() - Duration::hours(2)))
            .await
            .unwrap();
        assert!(matches!(
            f.svc.scan(&late.qr_data).await.unwrap(),
            ScanOutcome::Rejected("Departure time has passed")
        ));

        let mut unpaid = late.ticket.clone();
        unpaid.status = TicketStatus::Issued;
        f.repos.tickets().update(unpaid).await.unwrap();
        assert!(matches!(
            f.svc.scan(&late.qr_data).await.unwrap(),
            ScanOutcome::Rejected("Ticket not paid")
        ));
    }

    #[tokio::test]
    async fn taken_seats_reminders_and_trip_count() {
        let f = fixture(40).await;
        let at = departure();
        for seat in ["10", "2", "A1"] {
            f.svc.book(request(&f, seat, at)).await.unwrap();
        }
        let trip = TripQuery {
            bus_id: f.bus.id,
            departure_time: at,
            origin: Some("Gare Centrale".into()),
            destination: None,
        };
        assert_eq!(f.svc.taken_seats(&trip).await.unwrap(), vec!["2", "10", "A1"]);
        assert_eq!(f.svc.trip_tickets(&trip).await.unwrap().len(), 3);

        let summary = f.svc.send_departure_reminders(f.bus.id, at, 15).await.unwrap();
        assert_eq!(summary.total_tickets, 3);
        assert_eq!(summary.minutes_before, 15);
        assert!(summary.reminders_sent >= 1);

        let driver = seed_staff(f.repos.as_ref(), "drv@imas.cd", StaffRole::Driver).await;
        let mut req = request(&f, "5", at);
        req.driver_id = Some(driver.id);
        f.svc.book(req).await.unwrap();
        let mut req = request(&f, "6", at);
        req.driver_id = Some(driver.id);
        f.svc.book(req).await.unwrap();
        let mut req = request(&f, "7", at + Duration::hours(2));
        req.driver_id = Some(driver.id);
        f.svc.book(req).await.unwrap();
        assert_eq!(f.svc.driver_trip_count(driver.id).await.unwrap(), 2);
    }
}
