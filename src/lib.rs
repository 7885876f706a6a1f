pub mod cache;
pub mod clock;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod templates;

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::VetCache;
use crate::clock::Clock;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub vets_cache: Arc<VetCache>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire up state with a fresh `vets` cache.
    pub fn new(db: PgPool, config: config::AppConfig, clock: Arc<dyn Clock>) -> Self {
        let vets_cache = Arc::new(cache::vets_cache(&config));
        Self {
            db,
            config,
            vets_cache,
            clock,
        }
    }
}
