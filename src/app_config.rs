// Centralized configuration management for the Newsdesk backend
// Load ALL env vars ONCE at startup - no runtime reload

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Global application configuration loaded once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    // For tests, load .env file first
    #[cfg(test)]
    dotenv::dotenv().ok();

    AppConfig::from_env().expect("Failed to load configuration")
});

/// Accessor for the global configuration
pub fn config() -> &'static AppConfig {
    &CONFIG
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // Server
    pub bind_address: String,
    pub port: u16,
    pub environment: Environment,
    pub rust_log: String,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_min_connections: u32,
    pub database_connect_timeout: u64,
    pub database_idle_timeout: u64,
    pub database_max_lifetime: u64,

    // Security
    pub cors_allowed_origins: Vec<String>,
    pub enable_rate_limiting: bool,
    pub rate_limit_per_second: u32,
    pub rate_limit_burst: u32,

    // Features
    pub disable_embedded_migrations: bool,

    // Nested configs
    pub jwt: JwtSettings,
    pub media: MediaSettings,
}

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// JWT signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    pub access_secret: String,
    /// Access token validity window in seconds (default: 365 days)
    pub access_expiry: u64,
    pub audience: String,
    pub issuer: String,
}

/// Uploaded media configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSettings {
    /// Directory where uploaded images are persisted and served from
    pub upload_dir: String,
    /// Maximum accepted upload size in bytes (default: 2 MiB)
    pub max_bytes: u64,
    /// Allowed image MIME types
    pub allowed_types: Vec<String>,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Helper to get required env var
        let get_required = |key: &str| -> Result<String, ConfigError> {
            env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
        };

        // Helper to get env var with default
        let get_or_default =
            |key: &str, default: &str| -> String { env::var(key).unwrap_or_else(|_| default.to_string()) };

        // Helper to parse env var with default
        let parse_or_default = |key: &str, default: &str| -> Result<u32, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u32".to_string())
            })
        };

        let parse_u64_or_default = |key: &str, default: &str| -> Result<u64, ConfigError> {
            get_or_default(key, default).parse().map_err(|_| {
                ConfigError::InvalidValue(key.to_string(), "not a valid u64".to_string())
            })
        };

        let parse_bool_or_default = |key: &str, default: &str| -> bool {
            get_or_default(key, default).to_lowercase() == "true"
        };

        // Parse bind address to extract port
        let bind_address = get_or_default("BIND_ADDRESS", "0.0.0.0:8080");
        let port = bind_address
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let environment_str = get_or_default("ENVIRONMENT", "development");
        let environment = Environment::from(environment_str);

        // JWT secret validation
        let jwt_access_secret = get_required("JWT_ACCESS_SECRET")?;
        if jwt_access_secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "JWT_ACCESS_SECRET".to_string(),
                "Secret must be at least 32 characters long".to_string(),
            ));
        }

        let database_url = get_required("DATABASE_URL")?;
        let database_max_connections = parse_or_default("DATABASE_MAX_CONNECTIONS", "100")?;
        let database_min_connections = parse_or_default("DATABASE_MIN_CONNECTIONS", "10")?;
        let database_connect_timeout = parse_u64_or_default("DATABASE_CONNECT_TIMEOUT", "30")?;
        let database_idle_timeout = parse_u64_or_default("DATABASE_IDLE_TIMEOUT", "600")?;
        let database_max_lifetime = parse_u64_or_default("DATABASE_MAX_LIFETIME", "1800")?;

        // 365 days by default, matching the token lifetime the product shipped with
        let jwt_access_expiry = parse_u64_or_default("JWT_ACCESS_EXPIRY", "31536000")?;
        let jwt_audience = get_or_default("JWT_AUDIENCE", "newsdesk");
        let jwt_issuer = get_or_default("JWT_ISSUER", "newsdesk");

        let media_upload_dir = get_or_default("MEDIA_UPLOAD_DIR", "public/images");
        let media_max_bytes = parse_u64_or_default("MEDIA_MAX_BYTES", "2097152")?;
        let media_allowed_types: Vec<String> = get_or_default(
            "MEDIA_ALLOWED_TYPES",
            "image/png,image/jpg,image/jpeg,image/svg+xml,image/webp,image/gif",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        let cors_allowed_origins: Vec<String> = get_or_default("CORS_ALLOWED_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let enable_rate_limiting = parse_bool_or_default("ENABLE_RATE_LIMITING", "true");
        let rate_limit_per_second = parse_or_default("RATE_LIMIT_PER_SECOND", "100")?;
        let rate_limit_burst = parse_or_default("RATE_LIMIT_BURST", "200")?;

        let disable_embedded_migrations =
            parse_bool_or_default("DISABLE_EMBEDDED_MIGRATIONS", "false");

        let rust_log = get_or_default("RUST_LOG", "info");

        Ok(AppConfig {
            bind_address,
            port,
            environment,
            rust_log,
            database_url,
            database_max_connections,
            database_min_connections,
            database_connect_timeout,
            database_idle_timeout,
            database_max_lifetime,
            cors_allowed_origins,
            enable_rate_limiting,
            rate_limit_per_second,
            rate_limit_burst,
            disable_embedded_migrations,
            jwt: JwtSettings {
                access_secret: jwt_access_secret,
                access_expiry: jwt_access_expiry,
                audience: jwt_audience,
                issuer: jwt_issuer,
            },
            media: MediaSettings {
                upload_dir: media_upload_dir,
                max_bytes: media_max_bytes,
                allowed_types: media_allowed_types,
            },
        })
    }
}
