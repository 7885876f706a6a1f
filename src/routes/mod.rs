//! Route definitions for the PetClinic service.

pub mod dashboard;
pub mod health;
pub mod owners;
pub mod pets;
pub mod vets;
pub mod visits;
pub mod welcome;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    let api_routes = Router::new()
        .route("/dashboard", get(dashboard::summary))
        .route("/vets", get(vets::list))
        .route("/pettypes", get(pets::types))
        .route("/owners", get(owners::list).post(owners::create))
        .route(
            "/owners/{owner_id}",
            get(owners::get_by_id).put(owners::update),
        )
        .route("/owners/{owner_id}/pets", post(pets::create))
        .route("/owners/{owner_id}/pets/{pet_id}", put(pets::update))
        .route("/owners/{owner_id}/pets/{pet_id}/image", get(pets::image))
        .route(
            "/owners/{owner_id}/pets/{pet_id}/visits",
            get(visits::list).post(visits::create),
        );

    Router::new()
        .route("/", get(welcome::welcome))
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
