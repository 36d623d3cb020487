use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, audio, generate};
use crate::state::AppState;
use std::sync::Arc;

/// Create the HTTP API router
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/api/generate-content", post(generate::generate_content))
        .route("/generate-audio", post(audio::generate_audio))
        .layer(TraceLayer::new_for_http())
}
