// Middleware modules for the Newsdesk backend

pub mod auth;
pub mod auth_middleware;
pub mod cors;
pub mod rate_limit;

pub use auth::AuthenticatedUser;
pub use auth_middleware::auth_middleware;
pub use cors::cors_layer;
pub use rate_limit::{rate_limit_middleware, IpRateLimiter};
