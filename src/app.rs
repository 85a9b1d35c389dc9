// Application state and configuration
use std::sync::Arc;

use crate::{
    app_config::AppConfig,
    db::DieselPool,
    middleware::rate_limit::IpRateLimiter,
    services::{JwtService, MediaService},
};

// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub diesel_pool: DieselPool,
    pub jwt_service: Arc<JwtService>,
    pub media_service: Arc<MediaService>,
    pub rate_limiter: Arc<IpRateLimiter>,
    pub max_connections: u32,
}
