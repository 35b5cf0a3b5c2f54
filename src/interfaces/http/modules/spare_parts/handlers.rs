//! Spare part handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::inventory::InventoryService;
use crate::domain::spare_part::SparePart;
use crate::interfaces::http::common::{created, ok, ApiError, ApiResponse, ApiResult};

#[derive(Clone)]
pub struct SparePartHandlerState {
    pub inventory: Arc<InventoryService>,
}

fn to_dtos(parts: Vec<SparePart>) -> Vec<SparePartDto> {
    parts.into_iter().map(SparePartDto::from).collect()
}

fn required_quantity(request: StockChangeRequest) -> Result<i32, ApiError> {
    request
        .quantity
        .ok_or_else(|| ApiError::bad_request("Quantity is required"))
}

#[utoipa::path(
    get,
    path = "/api/spare-parts",
    tag = "Spare parts",
    responses((status = 200, description = "All parts", body = ApiResponse<Vec<SparePartDto>>))
)]
pub async fn list_parts(State(state): State<SparePartHandlerState>) -> ApiResult<Vec<SparePartDto>> {
    ok(to_dtos(state.inventory.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/spare-parts/{id}",
    tag = "Spare parts",
    params(("id" = i64, Path, description = "Part ID")),
    responses(
        (status = 200, description = "Part", body = ApiResponse<SparePartDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_part(
    State(state): State<SparePartHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<SparePartDto> {
    ok(state.inventory.get(id).await?.into())
}

#[utoipa::path(
    get,
    path = "/api/spare-parts/part/{part_number}",
    tag = "Spare parts",
    params(("part_number" = String, Path, description = "Part number")),
    responses(
        (status = 200, description = "Part", body = ApiResponse<SparePartDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn by_part_number(
    State(state): State<SparePartHandlerState>,
    Path(part_number): Path<String>,
) -> ApiResult<SparePartDto> {
    ok(state.inventory.by_part_number(&part_number).await?.into())
}

#[utoipa::path(
    post,
    path = "/api/spare-parts",
    tag = "Spare parts",
    request_body = SparePartRequest,
    responses(
        (status = 201, description = "Part created", body = ApiResponse<SparePartDto>),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Part number already exists")
    )
)]
pub async fn create_part(
    State(state): State<SparePartHandlerState>,
    Json(request): Json<SparePartRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SparePartDto>>), ApiError> {
    created(state.inventory.create(request.into()).await?.into())
}

#[utoipa::path(
    put,
    path = "/api/spare-parts/{id}",
    tag = "Spare parts",
    params(("id" = i64, Path, description = "Part ID")),
    request_body = SparePartRequest,
    responses(
        (status = 200, description = "Part updated", body = ApiResponse<SparePartDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Part number already exists")
    )
)]
pub async fn update_part(
    State(state): State<SparePartHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<SparePartRequest>,
) -> ApiResult<SparePartDto> {
    ok(state.inventory.update(id, request.into()).await?.into())
}

#[utoipa::path(
    delete,
    path = "/api/spare-parts/{id}",
    tag = "Spare parts",
    params(("id" = i64, Path, description = "Part ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_part(
    State(state): State<SparePartHandlerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.inventory.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/spare-parts/category/{category}",
    tag = "Spare parts",
    params(("category" = String, Path, description = "Category")),
    responses((status = 200, description = "Parts in the category", body = ApiResponse<Vec<SparePartDto>>))
)]
pub async fn by_category(
    State(state): State<SparePartHandlerState>,
    Path(category): Path<String>,
) -> ApiResult<Vec<SparePartDto>> {
    ok(to_dtos(state.inventory.by_category(&category).await?))
}

#[utoipa::path(
    get,
    path = "/api/spare-parts/categories",
    tag = "Spare parts",
    responses((status = 200, description = "Distinct categories", body = ApiResponse<Vec<String>>))
)]
pub async fn categories(State(state): State<SparePartHandlerState>) -> ApiResult<Vec<String>> {
    ok(state.inventory.categories().await?)
}

#[utoipa::path(
    get,
    path = "/api/spare-parts/search",
    tag = "Spare parts",
    params(SearchParams),
    responses((status = 200, description = "Matching parts", body = ApiResponse<Vec<SparePartDto>>))
)]
pub async fn search(
    State(state): State<SparePartHandlerState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<SparePartDto>> {
    ok(to_dtos(state.inventory.search(&params.q).await?))
}

#[utoipa::path(
    get,
    path = "/api/spare-parts/low-stock",
    tag = "Spare parts",
    responses((status = 200, description = "Parts at or below their minimum level", body = ApiResponse<Vec<SparePartDto>>))
)]
pub async fn low_stock(State(state): State<SparePartHandlerState>) -> ApiResult<Vec<SparePartDto>> {
    ok(to_dtos(state.inventory.low_stock().await?))
}

#[utoipa::path(
    get,
    path = "/api/spare-parts/out-of-stock",
    tag = "Spare parts",
    responses((status = 200, description = "Parts with zero quantity", body = ApiResponse<Vec<SparePartDto>>))
)]
pub async fn out_of_stock(State(state): State<SparePartHandlerState>) -> ApiResult<Vec<SparePartDto>> {
    ok(to_dtos(state.inventory.out_of_stock().await?))
}

#[utoipa::path(
    patch,
    path = "/api/spare-parts/{id}/decrease-stock",
    tag = "Spare parts",
    params(("id" = i64, Path, description = "Part ID")),
    request_body = StockChangeRequest,
    responses(
        (status = 200, description = "Stock decreased", body = ApiResponse<SparePartDto>),
        (status = 400, description = "Insufficient stock or invalid quantity"),
        (status = 404, description = "Not found")
    )
)]
pub async fn decrease_stock(
    State(state): State<SparePartHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<StockChangeRequest>,
) -> ApiResult<SparePartDto> {
    let quantity = required_quantity(request)?;
    ok(state.inventory.decrease_stock(id, quantity).await?.into())
}

#[utoipa::path(
    patch,
    path = "/api/spare-parts/{id}/increase-stock",
    tag = "Spare parts",
    params(("id" = i64, Path, description = "Part ID")),
    request_body = StockChangeRequest,
    responses(
        (status = 200, description = "Stock increased", body = ApiResponse<SparePartDto>),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Not found")
    )
)]
pub async fn increase_stock(
    State(state): State<SparePartHandlerState>,
    Path(id): Path<i64>,
    Json(request): Json<StockChangeRequest>,
) -> ApiResult<SparePartDto> {
    let quantity = required_quantity(request)?;
    ok(state.inventory.increase_stock(id, quantity).await?.into())
}
