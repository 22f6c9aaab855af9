use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health;
use super::resources::{endpoints, integrations, people, products};
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/api/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // CRUD resources
        .nest("/api/person", people::router())
        .nest("/api/product", products::router())
        // Catalog and integrations, also under their legacy paths
        .nest("/api/endpoints", endpoints::router())
        .nest("/api/apiendpoints", endpoints::router())
        .nest("/api/integrations", integrations::router())
        .nest("/api/apiintegrations", integrations::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
