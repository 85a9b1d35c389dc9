// Library exports for the Newsdesk backend
// This file exposes modules and functions for library consumers

pub mod app;
pub mod app_config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, CONFIG};
pub use db::{DieselDatabaseConfig, DieselPool};
pub use middleware::auth_middleware;
pub use middleware::AuthenticatedUser;
pub use models::auth::AccessTokenClaims;
pub use services::{JwtConfig, JwtError, JwtService, MediaConfig, MediaError, MediaService};
pub use utils::{ApiError, FieldErrors};

// Re-export route builders
pub use handlers::{api_routes, auth_routes, news_routes, profile_routes};

// Re-export individual handlers for direct use
pub use handlers::auth::{login, register};
pub use handlers::news::{destroy, index, show, store, update};

// Library initialization function for external consumers
pub async fn initialize_app_state() -> Result<AppState, Box<dyn std::error::Error>> {
    use middleware::rate_limit::IpRateLimiter;
    use std::sync::Arc;
    use tracing::info;

    // Load environment
    dotenv::dotenv().ok();

    // Initialize config
    let config = app_config::config();

    // Initialize database pool
    info!("Initializing database pool...");
    let db_config = db::DieselDatabaseConfig::default();
    let max_connections = db_config.max_connections;
    let diesel_pool = db::create_diesel_pool(db_config).await?;

    // Run migrations if enabled
    if migrations::should_run_migrations() {
        info!("Running embedded migrations...");
        migrations::run_migrations(&diesel_pool)
            .await
            .map_err(|e| format!("Migration failed: {}", e))?;
    }

    // Initialize services
    let jwt_service = Arc::new(JwtService::from_env()?);

    let media_service = Arc::new(MediaService::from_env());
    media_service.ensure_upload_dir().await?;
    info!("Media upload directory: {:?}", media_service.upload_dir());

    let rate_limiter = Arc::new(IpRateLimiter::from_config(config));

    Ok(AppState {
        config: Arc::new(config.clone()),
        diesel_pool,
        jwt_service,
        media_service,
        rate_limiter,
        max_connections,
    })
}

/// Assemble the full router: /api resources, health, static media, and the
/// middleware stack
pub fn build_app(state: AppState) -> axum::Router {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::get;
    use tower_http::{services::ServeDir, trace::TraceLayer};

    let config = state.config.clone();

    let mut router = axum::Router::new()
        .route("/health", get(health_check))
        .nest("/api", handlers::api_routes(&state))
        .nest_service("/uploads", ServeDir::new(&config.media.upload_dir));

    // Rate limiting sits in front of every route when enabled
    if config.enable_rate_limiting {
        router = router.layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(middleware::cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        // Multipart bodies carry the image plus form fields; leave headroom
        // over the configured media maximum
        .layer(DefaultBodyLimit::max(
            config.media.max_bytes as usize + 1024 * 1024,
        ))
        .with_state(state)
}

// Health check handler
pub async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    use axum::http::StatusCode;
    use axum::Json;

    let mut overall_healthy = true;
    let timestamp = chrono::Utc::now().to_rfc3339();

    // Check PostgreSQL
    let postgres_health = match db::check_diesel_health(&state.diesel_pool).await {
        Ok(_) => serde_json::json!({
            "status": "healthy",
            "max_connections": state.max_connections,
            "error": null
        }),
        Err(e) => {
            overall_healthy = false;
            serde_json::json!({
                "status": "unhealthy",
                "error": format!("Database connection failed: {}", e)
            })
        },
    };

    let response = serde_json::json!({
        "status": if overall_healthy { "healthy" } else { "degraded" },
        "service": "newsdesk-backend",
        "timestamp": timestamp,
        "components": {
            "postgresql": postgres_health
        }
    });

    if overall_healthy {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
