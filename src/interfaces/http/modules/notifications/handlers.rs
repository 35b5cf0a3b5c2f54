//! Notification handlers
//!
//! Driver and passenger routes share one implementation parameterised by
//! the role the path implies.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::*;
use crate::application::notifications::{Delivery, NotificationService};
use crate::domain::notification::Notification;
use crate::domain::staff::StaffRole;
use crate::interfaces::http::common::{ok, ApiError, ApiResponse, ApiResult};
use crate::shared::non_blank;

#[derive(Clone)]
pub struct NotificationHandlerState {
    pub notifications: Arc<NotificationService>,
}

fn to_dtos(notifications: Vec<Notification>) -> Vec<NotificationDto> {
    notifications.into_iter().map(NotificationDto::from).collect()
}

async fn send(
    state: &NotificationHandlerState,
    id: i64,
    role: StaffRole,
    request: NotificationRequest,
) -> Result<Response, ApiError> {
    let message = non_blank(request.message.as_deref())
        .ok_or_else(|| ApiError::bad_request("Message is required"))?;
    let notification_type = non_blank(request.notification_type.as_deref()).unwrap_or("info");
    let delivery = state
        .notifications
        .send_to_role(id, role, message, notification_type, request.priority.as_deref())
        .await?;
    Ok(match delivery {
        Delivery::Duplicate(_) => StatusCode::NO_CONTENT.into_response(),
        Delivery::Delivered(n) => Json(ApiResponse::success(NotificationDto::from(n))).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/api/notifications/user/{user_id}",
    tag = "Notifications",
    params(("user_id" = i64, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Notifications, newest first", body = ApiResponse<Vec<NotificationDto>>),
        (status = 404, description = "User not found")
    )
)]
pub async fn for_user(
    State(state): State<NotificationHandlerState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Vec<NotificationDto>> {
    ok(to_dtos(state.notifications.for_user(user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/notifications/user/{user_id}/unread",
    tag = "Notifications",
    params(("user_id" = i64, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Unread notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 404, description = "User not found")
    )
)]
pub async fn unread_for_user(
    State(state): State<NotificationHandlerState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Vec<NotificationDto>> {
    ok(to_dtos(state.notifications.unread_for_user(user_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/notifications/user/{user_id}/unread/count",
    tag = "Notifications",
    params(("user_id" = i64, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Unread count", body = ApiResponse<UnreadCountDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn unread_count(
    State(state): State<NotificationHandlerState>,
    Path(user_id): Path<i64>,
) -> ApiResult<UnreadCountDto> {
    let count = state.notifications.unread_count(user_id).await?;
    ok(UnreadCountDto { count })
}

#[utoipa::path(
    put,
    path = "/api/notifications/user/{user_id}/read-all",
    tag = "Notifications",
    params(("user_id" = i64, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Notifications marked read", body = ApiResponse<MarkedReadDto>),
        (status = 404, description = "User not found")
    )
)]
pub async fn mark_all_read(
    State(state): State<NotificationHandlerState>,
    Path(user_id): Path<i64>,
) -> ApiResult<MarkedReadDto> {
    let updated = state.notifications.mark_all_read(user_id).await?;
    ok(MarkedReadDto { updated })
}

#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read", body = ApiResponse<NotificationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn mark_read(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<NotificationDto> {
    ok(state.notifications.mark_read(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/notifications/driver/{id}",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Driver notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 400, description = "Staff member is not a driver"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn driver_notifications(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<NotificationDto>> {
    ok(to_dtos(state.notifications.for_role(id, StaffRole::Driver).await?))
}

#[utoipa::path(
    get,
    path = "/api/notifications/driver/{id}/new",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Unread driver notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 400, description = "Staff member is not a driver"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn driver_new(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<NotificationDto>> {
    ok(to_dtos(state.notifications.unread_for_role(id, StaffRole::Driver).await?))
}

#[utoipa::path(
    post,
    path = "/api/notifications/driver/{id}",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Driver ID")),
    request_body = NotificationRequest,
    responses(
        (status = 200, description = "Notification created", body = ApiResponse<NotificationDto>),
        (status = 204, description = "Duplicate of a recent notification, not delivered"),
        (status = 400, description = "Missing message or staff member is not a driver"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn notify_driver(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<NotificationRequest>,
) -> Result<Response, ApiError> {
    send(&state, id, StaffRole::Driver, request).await
}

#[utoipa::path(
    put,
    path = "/api/notifications/driver/{id}/read-all",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Driver notifications marked read", body = ApiResponse<MarkedReadDto>),
        (status = 400, description = "Staff member is not a driver"),
        (status = 404, description = "Driver not found")
    )
)]
pub async fn driver_read_all(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<MarkedReadDto> {
    let updated = state
        .notifications
        .mark_all_read_for_role(id, StaffRole::Driver)
        .await?;
    ok(MarkedReadDto { updated })
}

#[utoipa::path(
    get,
    path = "/api/notifications/passenger/{id}",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Passenger ID")),
    responses(
        (status = 200, description = "Passenger notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 400, description = "Staff member is not a passenger"),
        (status = 404, description = "Passenger not found")
    )
)]
pub async fn passenger_notifications(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<NotificationDto>> {
    ok(to_dtos(state.notifications.for_role(id, StaffRole::Passenger).await?))
}

#[utoipa::path(
    get,
    path = "/api/notifications/passenger/{id}/new",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Passenger ID")),
    responses(
        (status = 200, description = "Unread passenger notifications", body = ApiResponse<Vec<NotificationDto>>),
        (status = 400, description = "Staff member is not a passenger"),
        (status = 404, description = "Passenger not found")
    )
)]
pub async fn passenger_new(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<NotificationDto>> {
    ok(to_dtos(
        state
            .notifications
            .unread_for_role(id, StaffRole::Passenger)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/notifications/passenger/{id}",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Passenger ID")),
    request_body = NotificationRequest,
    responses(
        (status = 200, description = "Notification created", body = ApiResponse<NotificationDto>),
        (status = 204, description = "Duplicate of a recent notification, not delivered"),
        (status = 400, description = "Missing message or staff member is not a passenger"),
        (status = 404, description = "Passenger not found")
    )
)]
pub async fn notify_passenger(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<NotificationRequest>,
) -> Result<Response, ApiError> {
    send(&state, id, StaffRole::Passenger, request).await
}

#[utoipa::path(
    put,
    path = "/api/notifications/passenger/{id}/read-all",
    tag = "Notifications",
    params(("id" = i64, Path, description = "Passenger ID")),
    responses(
        (status = 200, description = "Passenger notifications marked read", body = ApiResponse<MarkedReadDto>),
        (status = 400, description = "Staff member is not a passenger"),
        (status = 404, description = "Passenger not found")
    )
)]
pub async fn passenger_read_all(
    State(state): State<NotificationHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<MarkedReadDto> {
    let updated = state
        .notifications
        .mark_all_read_for_role(id, StaffRole::Passenger)
        .await?;
    ok(MarkedReadDto { updated })
}
