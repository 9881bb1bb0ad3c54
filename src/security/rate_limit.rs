//! Rate limiting middleware for the health routes.
//!
//! One token bucket shared by all clients: the limit protects the probed
//! service from being flooded through this endpoint, not fairness between
//! callers.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::config::RateLimitConfig;
use crate::observability::metrics;

/// Global token bucket: holds up to `burst` tokens, refilled at `rps` per second.
pub struct RateLimiter {
    state: Mutex<Bucket>,
    rps: f64,
    burst: f64,
}

struct Bucket {
    available: f64,
    refilled_at: Instant,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let burst = f64::from(config.burst_size);
        Self {
            state: Mutex::new(Bucket {
                available: burst,
                refilled_at: Instant::now(),
            }),
            rps: f64::from(config.requests_per_second),
            burst,
        }
    }

    /// Take one token if available.
    pub fn check(&self) -> bool {
        let mut bucket = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let earned = now.duration_since(bucket.refilled_at).as_secs_f64() * self.rps;
        bucket.available = (bucket.available + earned).min(self.burst);
        bucket.refilled_at = now;

        if bucket.available < 1.0 {
            return false;
        }
        bucket.available -= 1.0;
        true
    }
}

/// Middleware function rejecting requests once the bucket is empty.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    if limiter.check() {
        next.run(request).await
    } else {
        tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
        metrics::record_rate_limited();
        let mut response = Response::new(Body::from("Rate limit exceeded"));
        *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
        response
    }
}
