//! Dashboard routes: the welcome-page figures as JSON.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::services::dashboard::{self, WelcomeSummary};
use crate::AppState;

/// GET /api/v1/dashboard — totals and upcoming visits.
pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WelcomeSummary>>, AppError> {
    let summary =
        dashboard::get_summary(&state.db, &state.vets_cache, state.clock.as_ref()).await?;
    Ok(ApiResponse::success(summary))
}
