//! Ticket DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ticketing::{IssuedTicket, PriceQuote, ReminderSummary, SeatCheck, CURRENCY};
use crate::domain::ticket::Ticket;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    pub id: i64,
    pub ticket_number: String,
    pub reservation_code: String,
    pub passenger_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub seat_number: String,
    pub departure_time: DateTime<Utc>,
    pub boarding_time: Option<DateTime<Utc>>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub status: String,
    pub qr_code: Option<String>,
    pub has_luggage: bool,
    pub luggage_weight: Option<f64>,
    pub bus_id: i64,
    pub driver_id: Option<i64>,
    pub trip_id: Option<i64>,
    pub issued_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketDto {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            ticket_number: t.ticket_number,
            reservation_code: t.reservation_code,
            passenger_id: t.passenger_id,
            first_name: t.first_name,
            last_name: t.last_name,
            seat_number: t.seat_number,
            departure_time: t.departure_time,
            boarding_time: t.boarding_time,
            origin: t.origin,
            destination: t.destination,
            status: t.status.to_string(),
            qr_code: t.qr_code,
            has_luggage: t.has_luggage,
            luggage_weight: t.luggage_weight,
            bus_id: t.bus_id,
            driver_id: t.driver_id,
            trip_id: t.trip_id,
            issued_at: t.issued_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeatValidationRequest {
    pub bus_id: Option<i64>,
    pub seat_number: Option<String>,
    pub departure_time: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Identifies one departure of a bus
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub departure_time: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub bus_id: Option<i64>,
    pub passenger_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub seat_number: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<String>,
    #[serde(default)]
    pub has_luggage: bool,
    pub luggage_weight: Option<f64>,
    pub driver_id: Option<i64>,
    pub trip_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[serde(default)]
    pub qr_data: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(default)]
    pub has_luggage: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    pub bus_id: Option<i64>,
    pub departure_time: Option<String>,
    #[serde(default = "default_minutes_before")]
    pub minutes_before: i64,
}

fn default_minutes_before() -> i64 {
    30
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SeatCheckResponse {
    pub available: bool,
    pub message: String,
}

impl From<SeatCheck> for SeatCheckResponse {
    fn from(c: SeatCheck) -> Self {
        Self {
            available: c.available,
            message: c.message,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTicketResponse {
    pub ticket: TicketDto,
    pub payment_amount: f64,
    pub qr_data: String,
    pub message: String,
}

impl From<IssuedTicket> for IssuedTicketResponse {
    fn from(i: IssuedTicket) -> Self {
        Self {
            ticket: i.ticket.into(),
            payment_amount: i.payment_amount,
            qr_data: i.qr_data,
            message: i.message,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub ticket_id: i64,
    pub ticket_number: String,
    pub qr_data: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScanResponse {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketDto>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteDto {
    pub base_price: f64,
    pub distance_multiplier: f64,
    pub luggage_price: f64,
    pub total_price: f64,
    pub currency: String,
}

impl From<PriceQuote> for PriceQuoteDto {
    fn from(q: PriceQuote) -> Self {
        Self {
            base_price: q.base_price,
            distance_multiplier: q.distance_multiplier,
            luggage_price: q.luggage_price,
            total_price: q.total_price,
            currency: CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub total_tickets: usize,
    pub reminders_sent: usize,
    pub minutes_before: i64,
}

impl From<ReminderSummary> for ReminderResponse {
    fn from(s: ReminderSummary) -> Self {
        Self {
            total_tickets: s.total_tickets,
            reminders_sent: s.reminders_sent,
            minutes_before: s.minutes_before,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TripCountResponse {
    pub driver_id: i64,
    pub trip_count: usize,
}
