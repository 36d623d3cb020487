use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the CORS layer from the configured origins.
///
/// `*` allows any origin. Otherwise the value is a comma-separated origin
/// list; entries that are not valid header values are skipped. `None` means
/// same-origin only.
pub fn cors_layer(origins: Option<&str>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    match origins.map(str::trim) {
        Some("*") => base.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            base.allow_origin(origins)
        }
        None => {
            // No allow_origin = same-origin only (browsers block cross-origin requests)
            info!(
                "CORS not configured, defaulting to same-origin only. \
                 Set CORS_ALLOWED_ORIGINS to enable cross-origin access."
            );
            base
        }
    }
}
