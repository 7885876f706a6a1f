//! Visit routes.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::models::visit::{Visit, VisitForm};
use crate::services::visit as visit_service;
use crate::AppState;

/// GET /api/v1/owners/:owner_id/pets/:pet_id/visits — a pet's visits.
pub async fn list(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Vec<Visit>>>, AppError> {
    let visits = visit_service::list_for_pet(&state.db, owner_id, pet_id).await?;
    Ok(ApiResponse::success(visits))
}

/// POST /api/v1/owners/:owner_id/pets/:pet_id/visits — book a visit.
pub async fn create(
    State(state): State<AppState>,
    Path((owner_id, pet_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<VisitForm>,
) -> Result<Json<ApiResponse<Visit>>, AppError> {
    let visit =
        visit_service::create(&state.db, owner_id, pet_id, &body, state.clock.today()).await?;
    Ok(ApiResponse::success(visit))
}
