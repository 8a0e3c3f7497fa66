use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard shell
        .route("/", get(handlers::dashboard))
        // Snapshot endpoints
        .route("/api/snapshot", get(handlers::get_snapshot))
        .route("/api/snapshot/evaluate", post(handlers::evaluate_snapshot))
        .route("/api/live", get(handlers::get_snapshot))
        // Liveness
        .route("/health", get(handlers::health_handler))
        // Add state and CORS
        .with_state(state)
        .layer(cors)
}
