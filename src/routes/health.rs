//! Health check endpoints for liveness and readiness checks.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::cache::CacheStatistics;
use crate::errors::ApiResponse;
use crate::AppState;

/// Readiness check detail.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub vets_cache: CacheStatistics,
    pub vets_cache_hit_rate: f64,
}

/// Liveness check — always returns OK if the process is running.
pub async fn live() -> &'static str {
    "OK"
}

/// Readiness check — checks database connectivity and reports cache usage.
pub async fn ready(State(state): State<AppState>) -> Json<ApiResponse<HealthStatus>> {
    let db_status = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            format!("error: {e}")
        }
    };

    let vets_cache = state.vets_cache.statistics().await;
    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        database: db_status,
        vets_cache_hit_rate: vets_cache.hit_rate(),
        vets_cache,
    })
}
