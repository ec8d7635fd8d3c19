//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Equalizer API (v1)
        .route(
            "/v1/equalizer/classify",
            post(handlers::equalizer::classify),
        )
        .route(
            "/v1/equalizer/playbook",
            post(handlers::equalizer::playbook),
        )
        .route("/v1/equalizer/reset", post(handlers::equalizer::reset))
        // Model-backed chat (v1)
        .route("/v1/companion", post(handlers::companion::companion))
        .route("/v1/chat", post(handlers::chat::chat))
        // Attach state
        .with_state(state)
}
