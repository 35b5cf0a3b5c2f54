//! Prediction handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::warn;

use super::dto::*;
use crate::application::equipment::EquipmentService;
use crate::infrastructure::{PredictionClient, PredictionReply};
use crate::interfaces::http::common::{ApiError, ApiResponse};

#[derive(Clone)]
pub struct PredictionState {
    pub client: Arc<PredictionClient>,
    pub equipment: Arc<EquipmentService>,
}

#[utoipa::path(
    post,
    path = "/api/predictions/maintenance",
    tag = "Predictions",
    request_body = PredictionRequest,
    responses(
        (status = 200, description = "Prediction from the upstream service", body = ApiResponse<Value>),
        (status = 400, description = "Missing or non-numeric equipmentId"),
        (status = 404, description = "Equipment not registered"),
        (status = 502, description = "Prediction service unreachable")
    )
)]
pub async fn predict_maintenance(
    State(state): State<PredictionState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Response, ApiError> {
    let equipment_id = request.equipment_id().map_err(ApiError::bad_request)?;
    let equipment_id = state.equipment.get(equipment_id).await?.id.to_string();

    let reply = state
        .client
        .predict_maintenance(&equipment_id)
        .await
        .map_err(|e| {
            warn!(url = state.client.url(), error = %e, "Prediction service unreachable");
            ApiError::new(StatusCode::BAD_GATEWAY, "Prediction service unavailable")
        })?;

    Ok(match reply {
        PredictionReply::Success(value) => Json(ApiResponse::success(value)).into_response(),
        PredictionReply::Upstream { status, body } => {
            warn!(status, equipment_id, "Prediction service returned an error");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let dto = UpstreamErrorDto {
                error: "Prediction service error".to_string(),
                detail: body,
            };
            (status, Json(dto)).into_response()
        }
    })
}
