//! Bearer-token authentication middleware for Axum

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::domain::staff::StaffRole;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};

use super::common::ApiError;

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
            AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
            AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
        };
        ApiError::new(status, message).into_response()
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// The staff member behind a verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedStaff {
    pub id: i64,
    pub email: String,
    pub role: Option<StaffRole>,
}

impl AuthenticatedStaff {
    fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            id: claims.staff_id()?,
            role: StaffRole::from_str(&claims.role),
            email: claims.email,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(StaffRole::Admin)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedStaff {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedStaff>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ").map(str::trim)
}

/// Rejects requests without a valid, unexpired Bearer JWT
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return AuthError::MissingToken.into_response();
    };

    let Some(token) = extract_token(auth_header) else {
        return AuthError::InvalidToken.into_response();
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) if claims.is_expired() => AuthError::ExpiredToken.into_response(),
        Ok(claims) => match AuthenticatedStaff::from_claims(claims) {
            Some(staff) => {
                request.extensions_mut().insert(staff);
                next.run(request).await
            }
            None => AuthError::InvalidToken.into_response(),
        },
        Err(e) => {
            debug!(error = %e, "Rejected bearer token");
            AuthError::InvalidToken.into_response()
        }
    }
}

/// Layered inside `auth_middleware`; lets only ADMIN through
pub async fn require_admin(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedStaff>() {
        Some(staff) if staff.is_admin() => next.run(request).await,
        Some(_) => AuthError::InsufficientPermissions.into_response(),
        None => AuthError::MissingToken.into_response(),
    }
}
