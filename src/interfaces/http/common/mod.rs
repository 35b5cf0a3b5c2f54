//! Response envelope and error mapping shared by every handler

pub mod validated_json;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::application::ticketing::BookingError;
use crate::domain::DomainError;

pub use validated_json::ValidatedJson;

/// Standard API envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable reason for booking conflicts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            error_code: None,
        }
    }
}

/// Page of results with its position
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            ((total as f64) / (limit as f64)).ceil() as u32
        };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// Error half of every handler result
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error_code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_code: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let status = if e.is_transient() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            match &e {
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %e, "Request failed");
        }
        Self::new(status, e.to_string())
    }
}

impl From<BookingError> for ApiError {
    fn from(e: BookingError) -> Self {
        match e {
            BookingError::Rejected { reason, message } => Self {
                status: StatusCode::CONFLICT,
                message,
                error_code: Some(reason.error_code()),
            },
            BookingError::Domain(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = ApiResponse::<()>::error(self.message);
        body.error_code = self.error_code.map(str::to_string);
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

/// `201 Created` with the envelope
pub fn created<T>(data: T) -> Result<(StatusCode, Json<ApiResponse<T>>), ApiError> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

/// Parse an optional query/body timestamp, rejecting garbage
pub fn parse_time(value: Option<&str>, field: &str) -> Result<Option<chrono::DateTime<chrono::Utc>>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => crate::shared::parse_datetime(v)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid {}: {}", field, v))),
    }
}

/// Parse an optional `YYYY-MM-DD` date, rejecting garbage
pub fn parse_date(value: Option<&str>, field: &str) -> Result<Option<chrono::NaiveDate>, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => chrono::NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("Invalid {}: {}", field, v))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ticketing::BookingRejection;

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("Bus", "id", 1), StatusCode::NOT_FOUND),
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (
                DomainError::Validation("Database error: locked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn booking_conflicts_carry_an_error_code() {
        let e = ApiError::from(BookingError::Rejected {
            reason: BookingRejection::BusFull,
            message: "Bus is full".into(),
        });
        assert_eq!(e.status, StatusCode::CONFLICT);
        assert_eq!(e.error_code, Some("BUS_FULL"));
    }

    #[test]
    fn envelope_uses_camel_case() {
        let mut body = ApiResponse::<()>::error("taken");
        body.error_code = Some("SEAT_ALREADY_TAKEN".into());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["errorCode"], "SEAT_ALREADY_TAKEN");
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
    }

    #[test]
    fn dates_are_iso_days() {
        assert_eq!(parse_date(None, "from").unwrap(), None);
        assert_eq!(parse_date(Some(" "), "from").unwrap(), None);
        assert_eq!(
            parse_date(Some("2025-03-01"), "from").unwrap(),
            chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        let err = parse_date(Some("03/01/2025"), "from").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
