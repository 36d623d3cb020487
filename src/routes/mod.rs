pub mod api;
pub mod ws;

use std::sync::Arc;

use axum::Router;
use http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Build the complete application: relay, HTTP endpoints, CORS and security headers
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origins.as_deref());

    // Security headers
    let security_headers = tower::ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    api::create_api_router()
        .merge(ws::create_ws_router())
        .with_state(state)
        .layer(cors)
        .layer(security_headers)
}
