//! Veterinarian routes.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::vet::Vet;
use crate::services::vet as vet_service;
use crate::AppState;

/// GET /api/v1/vets — paginated veterinarians with specialties.
pub async fn list(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<Vet>>>, AppError> {
    let result = vet_service::list(&state.db, &state.vets_cache, &pagination).await?;
    Ok(ApiResponse::success(result))
}
