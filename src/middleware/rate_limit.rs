// IP rate limiting middleware
// Keyed token bucket in front of every route; the bucket algorithm itself is
// the governor crate's concern, this layer only enforces its verdict

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};
use serde_json::json;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;

use crate::app::AppState;

/// Per-IP request limiter shared across all routes
pub struct IpRateLimiter {
    limiter: RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>,
    clock: DefaultClock,
}

impl IpRateLimiter {
    pub fn new(per_second: u32, burst: u32) -> Self {
        let per_second = NonZeroU32::new(per_second.max(1)).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(burst.max(1)).unwrap_or(NonZeroU32::MIN);

        let quota = Quota::per_second(per_second).allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        }
    }

    pub fn from_config(config: &crate::app_config::AppConfig) -> Self {
        Self::new(config.rate_limit_per_second, config.rate_limit_burst)
    }

    /// Check one request from `ip`.
    /// Returns Err(retry_after_seconds) when over quota.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        match self.limiter.check_key(&ip) {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                Err(wait.as_secs().max(1))
            },
        }
    }
}

/// Middleware function rejecting over-quota clients with 429
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    // Connection info is absent when the listener isn't configured for it
    // (unit tests); fail open rather than reject everything
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip());

    let Some(ip) = ip else {
        return next.run(request).await;
    };

    match state.rate_limiter.check(ip) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            tracing::warn!(ip = %ip, retry_after, "Rate limit exceeded");
            (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "status": 429,
                    "message": format!("Too Many Requests. Try Again In {} Seconds", retry_after),
                    "retry_after": retry_after,
                })),
            )
                .into_response()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_is_allowed_then_rejected() {
        let limiter = IpRateLimiter::new(1, 2);
        let ip: IpAddr = "203.0.113.7".parse().unwrap();

        assert!(limiter.check(ip).is_ok());
        assert!(limiter.check(ip).is_ok());

        let retry_after = limiter.check(ip).expect_err("third burst request must be rejected");
        assert!(retry_after >= 1);
    }

    #[test]
    fn test_clients_are_limited_independently() {
        let limiter = IpRateLimiter::new(1, 1);
        let first: IpAddr = "203.0.113.8".parse().unwrap();
        let second: IpAddr = "203.0.113.9".parse().unwrap();

        assert!(limiter.check(first).is_ok());
        assert!(limiter.check(first).is_err());
        // A different client still has its own budget
        assert!(limiter.check(second).is_ok());
    }

    #[test]
    fn test_zero_config_is_clamped_to_one() {
        // Misconfigured zero rate must not panic
        let limiter = IpRateLimiter::new(0, 0);
        let ip: IpAddr = "203.0.113.10".parse().unwrap();
        assert!(limiter.check(ip).is_ok());
    }
}
