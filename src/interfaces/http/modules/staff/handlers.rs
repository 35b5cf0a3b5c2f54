//! Staff and authentication handlers
//!
//! Registration, login (with OTP for privileged roles) and password reset
//! are public. The rest sits behind `auth_middleware`; account mutations
//! additionally require ADMIN.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::identity::{StaffService, StaffUpdate};
use crate::domain::staff::StaffRole;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedStaff;

#[derive(Clone)]
pub struct StaffHandlerState {
    pub staff: Arc<StaffService>,
}

fn parse_role(role: Option<&str>) -> Result<Option<StaffRole>, ApiError> {
    match crate::shared::non_blank(role) {
        None => Ok(None),
        Some(r) => Ok(Some(StaffRole::parse(r)?)),
    }
}

#[utoipa::path(
    post,
    path = "/api/staff/register",
    tag = "Staff",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Passenger account created", body = ApiResponse<StaffDto>),
        (status = 400, description = "Missing field, short password or email taken")
    )
)]
pub async fn register(
    State(state): State<StaffHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StaffDto>>), ApiError> {
    let staff = state.staff.register(request.into()).await?;
    created(staff.into())
}

#[utoipa::path(
    post,
    path = "/api/staff/login",
    tag = "Staff",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued or OTP sent", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials or disabled account")
    )
)]
pub async fn login(
    State(state): State<StaffHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let outcome = state.staff.login(&request.email, &request.password).await?;
    ok(outcome.into())
}

#[utoipa::path(
    post,
    path = "/api/staff/verify-otp",
    tag = "Staff",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Token issued", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid or expired code")
    )
)]
pub async fn verify_otp(
    State(state): State<StaffHandlerState>,
    Json(request): Json<VerifyOtpRequest>,
) -> ApiResult<LoginResponse> {
    let auth = state.staff.verify_otp(&request.email, &request.otp).await?;
    ok(auth.into())
}

#[utoipa::path(
    post,
    path = "/api/staff/resend-otp",
    tag = "Staff",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "New code sent", body = ApiResponse<MessageResponse>),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn resend_otp(
    State(state): State<StaffHandlerState>,
    Json(request): Json<EmailRequest>,
) -> ApiResult<MessageResponse> {
    state.staff.resend_otp(&request.email).await?;
    ok(MessageResponse::new("OTP sent"))
}

#[utoipa::path(
    post,
    path = "/api/staff/check-email",
    tag = "Staff",
    request_body = EmailRequest,
    responses((status = 200, description = "Whether the email is registered", body = ApiResponse<EmailExistsResponse>))
)]
pub async fn check_email(
    State(state): State<StaffHandlerState>,
    Json(request): Json<EmailRequest>,
) -> ApiResult<EmailExistsResponse> {
    let exists = state.staff.email_exists(&request.email).await?;
    ok(EmailExistsResponse { exists })
}

#[utoipa::path(
    post,
    path = "/api/staff/forgot-password",
    tag = "Staff",
    request_body = ForgotPasswordRequest,
    responses((status = 200, description = "Neutral acknowledgement", body = ApiResponse<MessageResponse>))
)]
pub async fn forgot_password(
    State(state): State<StaffHandlerState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> ApiResult<MessageResponse> {
    let role = parse_role(request.role.as_deref())?;
    state.staff.forgot_password(&request.email, role).await?;
    ok(MessageResponse::new(
        "If an account exists for this email, a reset code has been sent",
    ))
}

#[utoipa::path(
    post,
    path = "/api/staff/reset-password",
    tag = "Staff",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<MessageResponse>),
        (status = 400, description = "Bad token or short password")
    )
)]
pub async fn reset_password(
    State(state): State<StaffHandlerState>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<MessageResponse> {
    state
        .staff
        .reset_password(&request.email, &request.token, &request.new_password)
        .await?;
    ok(MessageResponse::new("Password has been reset"))
}

#[utoipa::path(
    get,
    path = "/api/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(ListStaffParams),
    responses(
        (status = 200, description = "Staff list", body = ApiResponse<Vec<StaffDto>>),
        (status = 400, description = "Unknown role")
    )
)]
pub async fn list_staff(
    State(state): State<StaffHandlerState>,
    Query(params): Query<ListStaffParams>,
) -> ApiResult<Vec<StaffDto>> {
    let role = parse_role(params.role.as_deref())?;
    let staff = state.staff.list(role).await?;
    ok(staff.into_iter().map(StaffDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/staff/me",
    tag = "Staff",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "The authenticated staff member", body = ApiResponse<StaffDto>))
)]
pub async fn me(
    State(state): State<StaffHandlerState>,
    caller: AuthenticatedStaff,
) -> ApiResult<StaffDto> {
    ok(state.staff.get(caller.id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Staff details", body = ApiResponse<StaffDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_staff(
    State(state): State<StaffHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<StaffDto> {
    ok(state.staff.get(id).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Staff member created", body = ApiResponse<StaffDto>),
        (status = 403, description = "Caller is not an administrator"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_staff(
    State(state): State<StaffHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StaffDto>>), ApiError> {
    let role = parse_role(request.role.as_deref())?.unwrap_or(StaffRole::Passenger);
    let staff = state.staff.create(request.into(), role).await?;
    created(staff.into())
}

#[utoipa::path(
    post,
    path = "/api/staff/create-analyst",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Analyst created", body = ApiResponse<StaffDto>),
        (status = 403, description = "Caller is not an administrator")
    )
)]
pub async fn create_analyst(
    State(state): State<StaffHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StaffDto>>), ApiError> {
    let staff = state.staff.create_analyst(request.into()).await?;
    created(staff.into())
}

#[utoipa::path(
    get,
    path = "/api/staff/analysts",
    tag = "Staff",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All analysts", body = ApiResponse<Vec<StaffDto>>))
)]
pub async fn list_analysts(State(state): State<StaffHandlerState>) -> ApiResult<Vec<StaffDto>> {
    let staff = state.staff.analysts(false).await?;
    ok(staff.into_iter().map(StaffDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/staff/analysts/active",
    tag = "Staff",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Active analysts", body = ApiResponse<Vec<StaffDto>>))
)]
pub async fn list_active_analysts(
    State(state): State<StaffHandlerState>,
) -> ApiResult<Vec<StaffDto>> {
    let staff = state.staff.analysts(true).await?;
    ok(staff.into_iter().map(StaffDto::from).collect())
}

#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Staff ID")),
    request_body = UpdateStaffRequest,
    responses(
        (status = 200, description = "Staff updated", body = ApiResponse<StaffDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_staff(
    State(state): State<StaffHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStaffRequest>,
) -> ApiResult<StaffDto> {
    let changes = StaffUpdate {
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone_number: request.phone_number,
        password: request.password,
        role: parse_role(request.role.as_deref())?,
        active: request.active,
    };
    ok(state.staff.update(id, changes).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Staff ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_staff(
    State(state): State<StaffHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.staff.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
