//! Owner routes: search, registration, detail, and update.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::models::owner::{Owner, OwnerFilters, OwnerForm, OwnerSummary};
use crate::models::pagination::{PagedResult, Pagination};
use crate::services::owner as owner_service;
use crate::AppState;

/// GET /api/v1/owners — search by last-name prefix with pagination.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
    Query(filters): Query<OwnerFilters>,
) -> Result<Json<ApiResponse<PagedResult<OwnerSummary>>>, AppError> {
    let result = owner_service::search(&state.db, &filters, &pagination).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/v1/owners — register a new owner.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<OwnerForm>,
) -> Result<Json<ApiResponse<Owner>>, AppError> {
    let owner = owner_service::create(&state.db, &body).await?;
    Ok(ApiResponse::success(owner))
}

/// GET /api/v1/owners/:owner_id — owner with pets and visits.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Owner>>, AppError> {
    let owner = owner_service::find_by_id(&state.db, owner_id).await?;
    Ok(ApiResponse::success(owner))
}

/// PUT /api/v1/owners/:owner_id — replace owner details.
pub async fn update(
    State(state): State<AppState>,
    Path(owner_id): Path<Uuid>,
    Json(body): Json<OwnerForm>,
) -> Result<Json<ApiResponse<Owner>>, AppError> {
    let owner = owner_service::update(&state.db, owner_id, &body).await?;
    Ok(ApiResponse::success(owner))
}
