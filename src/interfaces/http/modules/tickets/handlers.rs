//! Ticket handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::ticketing::{NewTicket, ScanOutcome, TicketService, TripQuery};
use crate::interfaces::http::common::{created, ok, parse_time, ApiError, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct TicketHandlerState {
    pub tickets: Arc<TicketService>,
}

fn trip(bus_id: i64, request: TripRequest) -> Result<TripQuery, ApiError> {
    let departure_time = parse_time(request.departure_time.as_deref(), "departure time")?
        .ok_or_else(|| ApiError::bad_request("Departure time is required"))?;
    Ok(TripQuery {
        bus_id,
        departure_time,
        origin: request.origin,
        destination: request.destination,
    })
}

fn to_dtos(tickets: Vec<crate::domain::ticket::Ticket>) -> Vec<TicketDto> {
    tickets.into_iter().map(TicketDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/tickets/validate-seat",
    tag = "Tickets",
    request_body = SeatValidationRequest,
    responses(
        (status = 200, description = "Seat availability", body = ApiResponse<SeatCheckResponse>),
        (status = 400, description = "Missing field, unknown bus or seat out of range")
    )
)]
pub async fn validate_seat(
    State(state): State<TicketHandlerState>,
    Json(request): Json<SeatValidationRequest>,
) -> ApiResult<SeatCheckResponse> {
    let bus_id = request
        .bus_id
        .ok_or_else(|| ApiError::bad_request("Bus ID is required"))?;
    let seat = crate::shared::non_blank(request.seat_number.as_deref())
        .ok_or_else(|| ApiError::bad_request("Seat number is required"))?
        .to_string();
    let query = trip(
        bus_id,
        TripRequest {
            departure_time: request.departure_time,
            origin: request.origin,
            destination: request.destination,
        },
    )?;
    ok(state.tickets.validate_seat(&query, &seat).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/tickets/bus/{bus_id}/departure/specific",
    tag = "Tickets",
    params(("bus_id" = i64, Path, description = "Bus ID")),
    request_body = TripRequest,
    responses((status = 200, description = "Paid and boarded tickets of the trip", body = ApiResponse<Vec<TicketDto>>))
)]
pub async fn trip_tickets(
    State(state): State<TicketHandlerState>,
    Path(bus_id): Path<i64>,
    Json(request): Json<TripRequest>,
) -> ApiResult<Vec<TicketDto>> {
    let query = trip(bus_id, request)?;
    ok(to_dtos(state.tickets.trip_tickets(&query).await?))
}

#[utoipa::path(
    post,
    path = "/api/tickets/bus/{bus_id}/taken-seats",
    tag = "Tickets",
    params(("bus_id" = i64, Path, description = "Bus ID")),
    request_body = TripRequest,
    responses((status = 200, description = "Seat numbers already sold for the trip", body = ApiResponse<Vec<String>>))
)]
pub async fn taken_seats(
    State(state): State<TicketHandlerState>,
    Path(bus_id): Path<i64>,
    Json(request): Json<TripRequest>,
) -> ApiResult<Vec<String>> {
    let query = trip(bus_id, request)?;
    ok(state.tickets.taken_seats(&query).await?)
}

#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = "Tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket issued", body = ApiResponse<IssuedTicketResponse>),
        (status = 400, description = "Invalid booking"),
        (status = 409, description = "SEAT_ALREADY_TAKEN or BUS_FULL")
    )
)]
pub async fn create_ticket(
    State(state): State<TicketHandlerState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IssuedTicketResponse>>), ApiError> {
    let input = NewTicket {
        bus_id: request.bus_id,
        passenger_id: request.passenger_id,
        first_name: request.first_name,
        last_name: request.last_name,
        seat_number: request.seat_number,
        origin: request.origin,
        destination: request.destination,
        departure_time: parse_time(request.departure_time.as_deref(), "departure time")?,
        has_luggage: request.has_luggage,
        luggage_weight: request.luggage_weight,
        driver_id: request.driver_id,
        trip_id: request.trip_id,
    };
    let issued = state.tickets.book(input).await?;
    created(issued.into())
}

#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = "Tickets",
    responses((status = 200, description = "All tickets", body = ApiResponse<Vec<TicketDto>>))
)]
pub async fn list_tickets(State(state): State<TicketHandlerState>) -> ApiResult<Vec<TicketDto>> {
    ok(to_dtos(state.tickets.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = i64, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "Ticket", body = ApiResponse<TicketDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_ticket(
    State(state): State<TicketHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<TicketDto> {
    ok(state.tickets.get(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/tickets/number/{ticket_number}",
    tag = "Tickets",
    params(("ticket_number" = String, Path, description = "Ticket number")),
    responses(
        (status = 200, description = "Ticket", body = ApiResponse<TicketDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_by_number(
    State(state): State<TicketHandlerState>,
    Path(number): Path<String>,
) -> ApiResult<TicketDto> {
    ok(state.tickets.get_by_number(&number).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/tickets/passenger/{passenger_id}",
    tag = "Tickets",
    params(("passenger_id" = i64, Path, description = "Passenger ID")),
    responses((status = 200, description = "Passenger tickets", body = ApiResponse<Vec<TicketDto>>))
)]
pub async fn for_passenger(
    State(state): State<TicketHandlerState>,
    Path(passenger_id): Path<i64>,
) -> ApiResult<Vec<TicketDto>> {
    ok(to_dtos(state.tickets.for_passenger(passenger_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/tickets/bus/{bus_id}",
    tag = "Tickets",
    params(("bus_id" = i64, Path, description = "Bus ID")),
    responses((status = 200, description = "Bus tickets", body = ApiResponse<Vec<TicketDto>>))
)]
pub async fn for_bus(
    State(state): State<TicketHandlerState>,
    Path(bus_id): Path<i64>,
) -> ApiResult<Vec<TicketDto>> {
    ok(to_dtos(state.tickets.for_bus(bus_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/tickets/{id}/generate-qr",
    tag = "Tickets",
    params(("id" = i64, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "QR payload written", body = ApiResponse<QrCodeResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn generate_qr(
    State(state): State<TicketHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<QrCodeResponse> {
    let ticket = state.tickets.generate_qr(id).await?;
    ok(QrCodeResponse {
        ticket_id: ticket.id,
        qr_data: ticket.qr_payload(),
        ticket_number: ticket.ticket_number,
    })
}

#[utoipa::path(
    get,
    path = "/api/tickets/{id}/qr-code",
    tag = "Tickets",
    params(("id" = i64, Path, description = "Ticket ID")),
    responses(
        (status = 200, description = "QR payload", body = ApiResponse<QrCodeResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn qr_code(
    State(state): State<TicketHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<QrCodeResponse> {
    let ticket = state.tickets.get(id).await?;
    ok(QrCodeResponse {
        ticket_id: ticket.id,
        qr_data: ticket.qr_code.clone().unwrap_or_else(|| ticket.qr_payload()),
        ticket_number: ticket.ticket_number,
    })
}

#[utoipa::path(
    post,
    path = "/api/tickets/scan-qr",
    tag = "Tickets",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan verdict", body = ApiResponse<ScanResponse>),
        (status = 400, description = "Malformed payload"),
        (status = 404, description = "Unknown ticket")
    )
)]
pub async fn scan_qr(
    State(state): State<TicketHandlerState>,
    Json(request): Json<ScanRequest>,
) -> ApiResult<ScanResponse> {
    let response = match state.tickets.scan(&request.qr_data).await? {
        ScanOutcome::Boarded(ticket) => ScanResponse {
            valid: true,
            message: "Ticket validated successfully".to_string(),
            ticket: Some(ticket.into()),
        },
        ScanOutcome::Rejected(reason) => ScanResponse {
            valid: false,
            message: reason.to_string(),
            ticket: None,
        },
    };
    ok(response)
}

#[utoipa::path(
    post,
    path = "/api/tickets/calculate-price",
    tag = "Tickets",
    request_body = PriceRequest,
    responses((status = 200, description = "Fare breakdown", body = ApiResponse<PriceQuoteDto>))
)]
pub async fn calculate_price(
    State(state): State<TicketHandlerState>,
    Json(request): Json<PriceRequest>,
) -> ApiResult<PriceQuoteDto> {
    let quote = state.tickets.quote(
        request.origin.as_deref(),
        request.destination.as_deref(),
        request.has_luggage,
    );
    ok(quote.into())
}

#[utoipa::path(
    post,
    path = "/api/tickets/send-departure-reminders",
    tag = "Tickets",
    request_body = ReminderRequest,
    responses(
        (status = 200, description = "Reminder summary", body = ApiResponse<ReminderResponse>),
        (status = 400, description = "Missing bus or departure")
    )
)]
pub async fn send_departure_reminders(
    State(state): State<TicketHandlerState>,
    Json(request): Json<ReminderRequest>,
) -> ApiResult<ReminderResponse> {
    let bus_id = request
        .bus_id
        .ok_or_else(|| ApiError::bad_request("Bus ID is required"))?;
    let departure = parse_time(request.departure_time.as_deref(), "departure time")?
        .ok_or_else(|| ApiError::bad_request("Departure time is required"))?;
    let summary = state
        .tickets
        .send_departure_reminders(bus_id, departure, request.minutes_before)
        .await?;
    ok(summary.into())
}

#[utoipa::path(
    get,
    path = "/api/tickets/trips/driver/{driver_id}/count",
    tag = "Tickets",
    params(("driver_id" = i64, Path, description = "Driver ID")),
    responses((status = 200, description = "Distinct trips driven", body = ApiResponse<TripCountResponse>))
)]
pub async fn driver_trip_count(
    State(state): State<TicketHandlerState>,
    Path(driver_id): Path<i64>,
) -> ApiResult<TripCountResponse> {
    let trip_count = state.tickets.driver_trip_count(driver_id).await?;
    ok(TripCountResponse { driver_id, trip_count })
}
