// CORS layer built from the configured allowed origins

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer: wildcard config allows any origin, otherwise only
/// the configured whitelist
pub fn cors_layer(config: &crate::app_config::AppConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| {
                        tracing::warn!("Ignoring invalid CORS origin {}: {}", origin, e);
                        e
                    })
                    .ok()
            })
            .collect();
        layer.allow_origin(origins)
    }
}
