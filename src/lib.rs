//! Reading Roadmap Library
//!
//! Positions a book or topic within its knowledge domain and renders a
//! three-level learning roadmap generated by an external model.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub mod config;
pub mod embedded;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use services::{GeminiClient, LlmSettings, RoadmapError, RoadmapService, RoadmapServiceImpl};

/// Application shared state
///
/// Immutable after startup; the service is behind a trait object so the
/// model backend can be swapped (tests use a stub).
#[derive(Clone)]
pub struct AppState {
    pub roadmap_service: Arc<dyn RoadmapService>,
}

impl AppState {
    pub fn new(roadmap_service: Arc<dyn RoadmapService>) -> Self {
        Self { roadmap_service }
    }
}

/// Page, API and health routes (static assets and API docs are added by the binary)
pub fn build_router(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(handlers::pages::index))
        .route("/search", post(handlers::pages::search));

    let api_routes = Router::new()
        .route("/api/roadmap", post(handlers::roadmap::generate_roadmap))
        .route("/api/status", get(handlers::system::get_status));

    let health_routes = Router::new()
        .route("/health", get(handlers::system::health_check))
        .route("/ready", get(handlers::system::ready_check));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .with_state(state)
        .merge(health_routes)
}

#[cfg(test)]
mod tests;
